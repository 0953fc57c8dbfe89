use image::{DynamicImage, Rgb, RgbImage};
use tracing::{debug, warn};

use crate::analysis::types::{DamageRecord, DamageType};
use crate::error::AnnotationError;
use crate::report::glyphs::{draw_text, fill_clipped, GLYPH_HEIGHT};

pub const BOX_WIDTH: u32 = 150;
pub const BOX_HEIGHT: u32 = 100;
const LABEL_HEIGHT: i64 = 60;
const OUTLINE_WIDTH: i64 = 3;
const TEXT_SCALE: u32 = 2;
const TEXT_INSET: i64 = 5;
const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Where a damage label goes on the image.
///
/// This is a layout stand-in derived from the damage's index so that labels do
/// not pile up on each other. The backend reports no geometry, so the box says
/// nothing about where the damage actually is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

pub fn placeholder_box(
    index: usize,
    image_width: u32,
    image_height: u32,
) -> Result<PlaceholderBox, AnnotationError> {
    if image_width <= 200 || image_height <= 150 {
        return Err(AnnotationError::ImageTooSmall {
            width: image_width,
            height: image_height,
        });
    }
    let index = index as u64;
    let x = (index * 150 + 50) % u64::from(image_width - 200);
    let y = (index * 100 + 50) % u64::from(image_height - 150);
    Ok(PlaceholderBox {
        x: x as u32,
        y: y as u32,
        width: BOX_WIDTH,
        height: BOX_HEIGHT,
    })
}

pub fn damage_color(damage_type: DamageType) -> Rgb<u8> {
    match damage_type {
        DamageType::Scratch => Rgb([255, 255, 0]),
        DamageType::Dent => Rgb([255, 0, 0]),
        DamageType::Crack => Rgb([0, 255, 0]),
        DamageType::Rust => Rgb([255, 165, 0]),
        DamageType::Broken => Rgb([128, 0, 128]),
        DamageType::Unknown => Rgb([255, 255, 255]),
    }
}

fn label_lines(damage: &DamageRecord) -> [String; 3] {
    [
        damage.damage_type.as_str().to_uppercase(),
        damage.severity.to_string(),
        format!("{:.1}%", damage.confidence * 100.0),
    ]
}

/// Draws a placeholder box and a label block for every damage.
pub fn annotate(
    image: &DynamicImage,
    damages: &[DamageRecord],
) -> Result<DynamicImage, AnnotationError> {
    let mut canvas: RgbImage = image.to_rgb8();
    let (width, height) = canvas.dimensions();

    for (index, damage) in damages.iter().enumerate() {
        let bounds = placeholder_box(index, width, height)?;
        let color = damage_color(damage.damage_type);
        draw_box(&mut canvas, &bounds, color);
        draw_label(&mut canvas, &bounds, color, &label_lines(damage));
    }

    debug!("Annotated {} damages on {}x{} image", damages.len(), width, height);
    Ok(DynamicImage::ImageRgb8(canvas))
}

/// Like [`annotate`], but hands back the untouched image plus a notice when drawing fails.
pub fn annotate_or_original(
    image: &DynamicImage,
    damages: &[DamageRecord],
) -> (DynamicImage, Option<String>) {
    match annotate(image, damages) {
        Ok(annotated) => (annotated, None),
        Err(e) => {
            warn!("Error creating annotated image: {}", e);
            (
                image.clone(),
                Some(format!("Annotation unavailable, showing original image: {}", e)),
            )
        }
    }
}

fn draw_box(canvas: &mut RgbImage, bounds: &PlaceholderBox, color: Rgb<u8>) {
    let (x0, y0) = (i64::from(bounds.x), i64::from(bounds.y));
    let (x1, y1) = (x0 + i64::from(bounds.width), y0 + i64::from(bounds.height));
    let inset = OUTLINE_WIDTH - 1;

    fill_clipped(canvas, x0, y0, x1, y0 + inset, color);
    fill_clipped(canvas, x0, y1 - inset, x1, y1, color);
    fill_clipped(canvas, x0, y0, x0 + inset, y1, color);
    fill_clipped(canvas, x1 - inset, y0, x1, y1, color);
}

fn draw_label(canvas: &mut RgbImage, bounds: &PlaceholderBox, color: Rgb<u8>, lines: &[String]) {
    let (x0, y0) = (i64::from(bounds.x), i64::from(bounds.y));
    fill_clipped(
        canvas,
        x0,
        y0 - LABEL_HEIGHT,
        x0 + i64::from(bounds.width),
        y0,
        color,
    );

    let line_height = i64::from((GLYPH_HEIGHT + 1) * TEXT_SCALE);
    let text_top = y0 - LABEL_HEIGHT + TEXT_INSET;
    for (row, line) in lines.iter().enumerate() {
        draw_text(
            canvas,
            x0 + TEXT_INSET,
            text_top + line_height * row as i64,
            line,
            TEXT_SCALE,
            LABEL_TEXT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use image::{GenericImageView, ImageBuffer};

    use super::*;
    use crate::analysis::types::Severity;

    const BACKGROUND: Rgb<u8> = Rgb([40, 40, 40]);

    fn canvas(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, BACKGROUND))
    }

    fn damage(damage_type: DamageType) -> DamageRecord {
        DamageRecord {
            damage_type,
            severity: Severity::High,
            confidence: 0.876,
            area_percentage: 1.0,
            estimated_cost: None,
        }
    }

    #[test]
    fn test_placeholder_positions_follow_index_layout() {
        let (width, height) = (640, 480);
        for index in 0..12 {
            let bounds = placeholder_box(index, width, height).unwrap();
            assert_eq!(bounds.x as usize, (index * 150 + 50) % (640 - 200));
            assert_eq!(bounds.y as usize, (index * 100 + 50) % (480 - 150));
            assert_eq!((bounds.width, bounds.height), (150, 100));
        }
        assert_eq!(
            placeholder_box(3, width, height).unwrap(),
            PlaceholderBox { x: 60, y: 20, width: 150, height: 100 }
        );
    }

    #[test]
    fn test_small_images_cannot_host_labels() {
        assert_eq!(
            placeholder_box(0, 200, 480),
            Err(AnnotationError::ImageTooSmall { width: 200, height: 480 })
        );
        assert!(placeholder_box(0, 640, 150).is_err());
        assert!(placeholder_box(0, 201, 151).is_ok());
    }

    #[test]
    fn test_box_outline_uses_palette_color() {
        let palette = [
            (DamageType::Scratch, Rgb([255, 255, 0])),
            (DamageType::Dent, Rgb([255, 0, 0])),
            (DamageType::Crack, Rgb([0, 255, 0])),
            (DamageType::Rust, Rgb([255, 165, 0])),
            (DamageType::Broken, Rgb([128, 0, 128])),
            (DamageType::Unknown, Rgb([255, 255, 255])),
        ];
        for (damage_type, expected) in palette {
            let annotated = annotate(&canvas(640, 480), &[damage(damage_type)])
                .unwrap()
                .to_rgb8();
            // First box sits at (50, 50).
            assert_eq!(*annotated.get_pixel(50, 100), expected, "{damage_type}");
            assert_eq!(*annotated.get_pixel(200, 100), expected, "{damage_type}");
            assert_eq!(*annotated.get_pixel(125, 150), expected, "{damage_type}");
            assert_eq!(*annotated.get_pixel(125, 100), BACKGROUND, "{damage_type}");
        }
    }

    #[test]
    fn test_later_boxes_follow_index_layout() {
        let damages = [
            damage(DamageType::Scratch),
            damage(DamageType::Scratch),
            damage(DamageType::Scratch),
            damage(DamageType::Dent),
        ];
        let annotated = annotate(&canvas(640, 480), &damages).unwrap().to_rgb8();
        let red = Rgb([255, 0, 0]);
        // Index 3 wraps around to (60, 20) and is drawn over the first box.
        assert_eq!(*annotated.get_pixel(60, 70), red);
        assert_eq!(*annotated.get_pixel(210, 70), red);
        assert_eq!(*annotated.get_pixel(130, 120), red);
        assert_eq!(*annotated.get_pixel(130, 100), BACKGROUND);
        // Index 1 sits at (200, 150).
        assert_eq!(*annotated.get_pixel(200, 200), Rgb([255, 255, 0]));
    }

    #[test]
    fn test_label_block_sits_above_box() {
        let annotated = annotate(&canvas(640, 480), &[damage(DamageType::Dent)])
            .unwrap()
            .to_rgb8();
        // Index 0 sits at y = 50, so its label spans y in [-10, 50].
        assert_eq!(*annotated.get_pixel(52, 0), Rgb([255, 0, 0]));
        assert_eq!(*annotated.get_pixel(50, 51), Rgb([255, 0, 0]));
        let black_pixels = (50..=200)
            .flat_map(|x| (0..50).map(move |y| (x, y)))
            .filter(|&(x, y)| *annotated.get_pixel(x, y) == LABEL_TEXT_COLOR)
            .count();
        assert!(black_pixels > 0);
    }

    #[test]
    fn test_label_text() {
        let lines = label_lines(&damage(DamageType::Scratch));
        assert_eq!(lines, ["SCRATCH".to_string(), "high".to_string(), "87.6%".to_string()]);
    }

    #[test]
    fn test_fallback_returns_original_image() {
        let original = canvas(120, 90);
        let (image, notice) = annotate_or_original(&original, &[damage(DamageType::Rust)]);
        assert_eq!(image, original);
        assert!(notice.unwrap().contains("too small"));
    }

    #[test]
    fn test_annotation_keeps_dimensions() {
        let (image, notice) =
            annotate_or_original(&canvas(800, 600), &vec![damage(DamageType::Crack); 6]);
        assert!(notice.is_none());
        assert_eq!(image.dimensions(), (800, 600));
    }
}
