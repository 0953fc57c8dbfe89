use chrono::{DateTime, Local};

use crate::app::views::{load_image_texture, View};
use crate::report::ReportPanels;
use crate::report_service::AnalysisResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    Report,
    AnnotatedImage,
    CostSummary,
}

pub struct ResultsView {
    tab: ResultTab,
    panels: Option<ReportPanels>,
    texture: Option<egui::TextureHandle>,
    completed_at: Option<DateTime<Local>>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self {
            tab: ResultTab::Report,
            panels: None,
            texture: None,
            completed_at: None,
        }
    }

    pub fn set_response(&mut self, ctx: &egui::Context, response: AnalysisResponse) {
        self.texture = response
            .panels
            .image
            .as_ref()
            .map(|image| load_image_texture(ctx, "annotated_result", image));
        self.completed_at = Some(response.completed_at);
        self.panels = Some(response.panels);
    }

    fn draw_report(ui: &mut egui::Ui, panels: &ReportPanels) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut panels.report.as_str())
                    .desired_rows(20)
                    .desired_width(f32::INFINITY)
                    .font(egui::TextStyle::Monospace),
            );
        });
    }

    fn draw_image(&self, ui: &mut egui::Ui, panels: &ReportPanels) {
        if let Some(notice) = &panels.notice {
            ui.colored_label(egui::Color32::YELLOW, notice);
        }
        ui.label("Boxes mark each reported damage in list order; they are not detected locations.");
        match &self.texture {
            Some(texture) => {
                ui.add(egui::Image::new(texture).max_height(400.0));
            }
            None => {
                ui.label("No image");
            }
        }
    }

    fn draw_cost(ui: &mut egui::Ui, panels: &ReportPanels) {
        ui.add(
            egui::TextEdit::multiline(&mut panels.cost_summary.as_str())
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
    }
}

impl Default for ResultsView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for ResultsView {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.heading("Analysis Results");

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, ResultTab::Report, "Detailed Report");
            ui.selectable_value(&mut self.tab, ResultTab::AnnotatedImage, "Annotated Image");
            ui.selectable_value(&mut self.tab, ResultTab::CostSummary, "Cost Summary");
        });
        ui.separator();

        let Some(panels) = &self.panels else {
            ui.label("Upload an image to start the analysis.");
            return;
        };

        match self.tab {
            ResultTab::Report => Self::draw_report(ui, panels),
            ResultTab::AnnotatedImage => self.draw_image(ui, panels),
            ResultTab::CostSummary => Self::draw_cost(ui, panels),
        }

        if let Some(completed_at) = self.completed_at {
            ui.separator();
            ui.label(format!("Last analysis: {}", completed_at.format("%H:%M:%S")));
        }
    }
}
