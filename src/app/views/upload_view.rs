use std::path::PathBuf;

use image::DynamicImage;

use crate::app::views::load_image_texture;

const INSTRUCTIONS: [&str; 4] = [
    "Upload a clear photo of your car",
    "Ensure good lighting and visibility",
    "Include the damaged areas in the frame",
    "Supported formats: JPG, PNG, JPEG",
];

pub enum UploadEvent {
    LoadPath(PathBuf),
    Analyze,
}

pub struct UploadView {
    path_input: String,
    preview: Option<egui::TextureHandle>,
    busy: bool,
}

impl UploadView {
    pub fn new() -> Self {
        Self {
            path_input: String::new(),
            preview: None,
            busy: false,
        }
    }

    pub fn set_image(&mut self, ctx: &egui::Context, image: &DynamicImage) {
        self.preview = Some(load_image_texture(ctx, "upload_preview", image));
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<UploadEvent> {
        let mut event = None;

        ui.heading("Upload Car Image");
        ui.separator();

        ui.group(|ui| {
            ui.set_min_height(200.0);
            match &self.preview {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).max_height(400.0));
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Drop a car photo here");
                    });
                }
            }
        });

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.path_input).hint_text("Path to image file"),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Load").clicked() || submitted {
                let path = self.path_input.trim();
                if !path.is_empty() {
                    event = Some(UploadEvent::LoadPath(PathBuf::from(path)));
                }
            }
        });

        ui.add_space(8.0);
        let analyze = ui.add_enabled(
            !self.busy,
            egui::Button::new(egui::RichText::new("Analyze Damage").size(18.0))
                .min_size(egui::vec2(ui.available_width(), 36.0)),
        );
        if analyze.clicked() {
            event = Some(UploadEvent::Analyze);
        }
        if self.busy {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing...");
            });
        }

        ui.add_space(12.0);
        ui.label(egui::RichText::new("Instructions:").strong());
        for line in INSTRUCTIONS {
            ui.label(format!("• {}", line));
        }

        event
    }
}

impl Default for UploadView {
    fn default() -> Self {
        Self::new()
    }
}
