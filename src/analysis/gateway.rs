use std::io::{BufWriter, Write};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::analysis::backend::DamageBackend;
use crate::analysis::types::AnalysisResult;
use crate::error::AppError;

/// What a single analysis request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// No image was supplied.
    NoInput,
    /// The backend ran and found nothing.
    NoDamage,
    /// The backend reported at least one damage.
    Detected(AnalysisResult),
    /// The backend (or writing its input) failed. Holds a user-facing message.
    Failed(String),
}

/// Hands images to a damage backend and normalizes what comes back.
#[derive(Clone)]
pub struct AnalysisGateway {
    backend: Arc<dyn DamageBackend>,
    temp_suffix: String,
}

impl AnalysisGateway {
    pub fn new(backend: Arc<dyn DamageBackend>, temp_suffix: impl Into<String>) -> Self {
        Self {
            backend,
            temp_suffix: temp_suffix.into(),
        }
    }

    pub fn analyze(&self, image: Option<&DynamicImage>) -> AnalysisOutcome {
        let Some(image) = image else {
            return AnalysisOutcome::NoInput;
        };

        match self.run_backend(image) {
            Ok(result) if result.has_damage() => {
                info!(
                    "{} reported {} damages",
                    self.backend.name(),
                    result.classified_damages.len()
                );
                AnalysisOutcome::Detected(result)
            }
            Ok(_) => {
                info!("{} reported no damage", self.backend.name());
                AnalysisOutcome::NoDamage
            }
            Err(e) => {
                error!("Error processing image: {}", e);
                AnalysisOutcome::Failed(e.to_string())
            }
        }
    }

    fn run_backend(&self, image: &DynamicImage) -> Result<AnalysisResult, AppError> {
        // Removed when dropped, including when the backend errors or panics.
        let mut transient = tempfile::Builder::new()
            .prefix("damage-")
            .suffix(&self.temp_suffix)
            .tempfile()?;
        Self::write_image(&mut transient, image)?;
        debug!("Wrote upload to {}", transient.path().display());

        let result = self.backend.analyze_car_damage(transient.path());

        if let Err(e) = transient.close() {
            warn!("Failed to remove transient image: {}", e);
        }
        result
    }

    fn write_image(transient: &mut NamedTempFile, image: &DynamicImage) -> Result<(), AppError> {
        let format = ImageFormat::from_path(transient.path())?;
        let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
        let mut writer = BufWriter::new(transient.as_file_mut());
        rgb.write_to(&mut writer, format)?;
        writer.flush()?;
        Ok(())
    }
}
