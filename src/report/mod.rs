pub mod annotation;
pub mod cost_summary;
mod glyphs;
pub mod text_report;

use image::DynamicImage;

use crate::analysis::gateway::AnalysisOutcome;

pub use annotation::{annotate, annotate_or_original, damage_color, placeholder_box, PlaceholderBox};
pub use cost_summary::render_cost_summary;
pub use text_report::{render_report, NO_DAMAGE_MESSAGE};

pub const NO_INPUT_MESSAGE: &str = "Please upload an image";
pub const NO_INPUT_COST_MESSAGE: &str = "No analysis available";
pub const NO_DAMAGE_COST_MESSAGE: &str = "No repair costs estimated.";
pub const FAILED_COST_MESSAGE: &str = "Analysis failed";

/// The three output panels shown for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPanels {
    pub report: String,
    pub image: Option<DynamicImage>,
    pub cost_summary: String,
    /// Set when the annotated image could not be drawn.
    pub notice: Option<String>,
}

impl ReportPanels {
    pub fn failed(message: &str, original: Option<&DynamicImage>) -> Self {
        Self {
            report: format!("Error processing image: {}", message),
            image: original.cloned(),
            cost_summary: FAILED_COST_MESSAGE.to_string(),
            notice: None,
        }
    }
}

/// Turns an analysis outcome into the report, image and cost panels.
pub fn render(outcome: &AnalysisOutcome, original: Option<&DynamicImage>) -> ReportPanels {
    match outcome {
        AnalysisOutcome::NoInput => ReportPanels {
            report: NO_INPUT_MESSAGE.to_string(),
            image: None,
            cost_summary: NO_INPUT_COST_MESSAGE.to_string(),
            notice: None,
        },
        AnalysisOutcome::NoDamage => ReportPanels {
            report: NO_DAMAGE_MESSAGE.to_string(),
            image: original.cloned(),
            cost_summary: NO_DAMAGE_COST_MESSAGE.to_string(),
            notice: None,
        },
        AnalysisOutcome::Detected(result) => {
            let (image, notice) = match original {
                Some(original) => {
                    let (image, notice) = annotate_or_original(original, &result.classified_damages);
                    (Some(image), notice)
                }
                None => (None, None),
            };
            ReportPanels {
                report: render_report(&result.classified_damages, result.cost_analysis.as_ref()),
                image,
                cost_summary: render_cost_summary(result.cost_analysis.as_ref()),
                notice,
            }
        }
        AnalysisOutcome::Failed(message) => ReportPanels::failed(message, original),
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};

    use super::*;
    use crate::analysis::types::{AnalysisResult, CostAnalysis, DamageRecord, DamageType, Severity};

    fn car(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([10, 20, 30])))
    }

    fn detected() -> AnalysisOutcome {
        AnalysisOutcome::Detected(AnalysisResult {
            classified_damages: vec![DamageRecord {
                damage_type: DamageType::Rust,
                severity: Severity::Medium,
                confidence: 0.7,
                area_percentage: 1.2,
                estimated_cost: Some(250.0),
            }],
            cost_analysis: Some(CostAnalysis {
                labor_cost: 150.0,
                parts_cost: 75.0,
                additional_cost: 25.0,
                total_cost: 250.0,
            }),
        })
    }

    #[test]
    fn test_no_input_panels() {
        let panels = render(&AnalysisOutcome::NoInput, None);
        assert_eq!(panels.report, "Please upload an image");
        assert!(panels.image.is_none());
        assert_eq!(panels.cost_summary, "No analysis available");
    }

    #[test]
    fn test_no_damage_echoes_original() {
        let original = car(640, 480);
        let panels = render(&AnalysisOutcome::NoDamage, Some(&original));
        assert_eq!(panels.report, "No significant damage detected in the image.");
        assert_eq!(panels.image, Some(original));
        assert_eq!(panels.cost_summary, "No repair costs estimated.");
    }

    #[test]
    fn test_backend_failure_panels() {
        let original = car(640, 480);
        let panels = render(&AnalysisOutcome::Failed("boom".to_string()), Some(&original));
        assert_eq!(panels.report, "Error processing image: boom");
        assert_eq!(panels.image, Some(original));
        assert_eq!(panels.cost_summary, "Analysis failed");
    }

    #[test]
    fn test_detected_panels() {
        let original = car(640, 480);
        let panels = render(&detected(), Some(&original));
        assert!(panels.report.starts_with("CAR DAMAGE ANALYSIS REPORT"));
        assert!(panels.report.contains("TOTAL: $250.00"));
        assert_eq!(panels.cost_summary, "Total Estimated Repair Cost: $250.00");
        assert!(panels.notice.is_none());
        assert_ne!(panels.image, Some(original));
    }

    #[test]
    fn test_annotation_failure_keeps_text_outputs() {
        let original = car(100, 100);
        let panels = render(&detected(), Some(&original));
        assert_eq!(panels.image, Some(original));
        assert!(panels.notice.is_some());
        assert!(panels.report.contains("Rust detected"));
        assert_eq!(panels.cost_summary, "Total Estimated Repair Cost: $250.00");
    }
}
