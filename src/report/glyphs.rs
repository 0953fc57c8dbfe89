use image::{Rgb, RgbImage};

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

// 5x7 bitmap font, one byte per row, bit 4 is the leftmost column.
const UNKNOWN_GLYPH: [u8; 7] = [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04];

fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        ' ' => [0x00; 7],
        _ => UNKNOWN_GLYPH,
    }
}

/// Draws `text` with its top-left corner at `(x, y)`, clipped to the image.
/// Lowercase letters are rendered with the uppercase glyphs.
pub fn draw_text(image: &mut RgbImage, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
    let advance = i64::from((GLYPH_WIDTH + 1) * scale);
    for (index, c) in text.chars().enumerate() {
        let origin_x = x + advance * index as i64;
        for (row, bits) in glyph(c).iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (0x10 >> column) == 0 {
                    continue;
                }
                let left = origin_x + i64::from(column * scale);
                let top = y + row as i64 * i64::from(scale);
                fill_clipped(image, left, top, left + i64::from(scale) - 1, top + i64::from(scale) - 1, color);
            }
        }
    }
}

/// Fills the inclusive rectangle `[x0, y0]..[x1, y1]`, skipping pixels outside the image.
pub fn fill_clipped(image: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let (width, height) = (i64::from(image.width()), i64::from(image.height()));
    let (left, right) = (x0.max(0), x1.min(width - 1));
    let (top, bottom) = (y0.max(0), y1.min(height - 1));
    if left > right || top > bottom {
        return;
    }
    for py in top..=bottom {
        for px in left..=right {
            image.put_pixel(px as u32, py as u32, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_pixels_are_drawn_at_scale() {
        let mut image = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        draw_text(&mut image, 0, 0, "-", 2, Rgb([0, 0, 0]));
        // The dash is row 3, so it covers rows 6 and 7 at scale 2.
        assert_eq!(*image.get_pixel(0, 6), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(9, 7), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(0, 5), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(10, 6), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_drawing_off_image_is_clipped() {
        let mut image = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        fill_clipped(&mut image, -10, -10, 1, 1, Rgb([1, 2, 3]));
        fill_clipped(&mut image, 10, 10, 20, 20, Rgb([9, 9, 9]));
        assert_eq!(*image.get_pixel(0, 0), Rgb([1, 2, 3]));
        assert_eq!(*image.get_pixel(1, 1), Rgb([1, 2, 3]));
        assert_eq!(*image.get_pixel(2, 2), Rgb([255, 255, 255]));
        draw_text(&mut image, -100, -100, "SCRATCH", 2, Rgb([0, 0, 0]));
    }

    #[test]
    fn test_lowercase_uses_uppercase_glyphs() {
        assert_eq!(glyph('m'), glyph('M'));
        assert_eq!(glyph('~'), UNKNOWN_GLYPH);
    }
}
