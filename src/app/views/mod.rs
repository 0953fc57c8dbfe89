pub mod results_view;
pub mod upload_view;

use image::DynamicImage;

pub trait View {
    fn draw(&mut self, ui: &mut egui::Ui);
}

pub(crate) fn load_image_texture(
    ctx: &egui::Context,
    name: &str,
    image: &DynamicImage,
) -> egui::TextureHandle {
    let rgba = image.to_rgba8();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_raw().as_slice(),
    );
    ctx.load_texture(name, color_image, egui::TextureOptions::default())
}
