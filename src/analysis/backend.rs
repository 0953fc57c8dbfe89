use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::analysis::command_backend::CommandBackend;
use crate::analysis::demo_backend::DemoBackend;
use crate::analysis::types::AnalysisResult;
use crate::config::{BackendKind, BackendSettings};
use crate::error::AppError;

/// Strategy for the external damage analysis system.
///
/// The backend receives the path of an image on disk and returns the classified
/// damages together with an optional cost breakdown.
pub trait DamageBackend: Send + Sync {
    fn analyze_car_damage(&self, image_path: &Path) -> Result<AnalysisResult, AppError>;

    fn name(&self) -> &'static str;

    /// Whether results are simulated rather than produced by a real model.
    fn is_simulated(&self) -> bool {
        false
    }
}

pub fn backend_from_settings(settings: &BackendSettings) -> Result<Arc<dyn DamageBackend>, AppError> {
    let backend: Arc<dyn DamageBackend> = match settings.kind {
        BackendKind::Demo => match settings.seed {
            Some(seed) => Arc::new(DemoBackend::with_seed(seed)),
            None => Arc::new(DemoBackend::new()),
        },
        BackendKind::Command => {
            let program = settings
                .program
                .as_deref()
                .filter(|program| !program.is_empty())
                .ok_or_else(|| {
                    AppError::Configuration("Complete damage system not found: backend.program is not set".to_string())
                })?;
            Arc::new(CommandBackend::new(program, settings.args.clone()))
        }
    };
    info!("Using {} damage backend", backend.name());
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_backend_from_default_settings() {
        let backend = backend_from_settings(&BackendSettings::default()).unwrap();
        assert_eq!(backend.name(), "DemoBackend");
        assert!(backend.is_simulated());
    }

    #[test]
    fn test_command_backend_without_program_fails() {
        let settings = BackendSettings {
            kind: BackendKind::Command,
            ..BackendSettings::default()
        };
        match backend_from_settings(&settings) {
            Err(AppError::Configuration(message)) => {
                assert!(message.starts_with("Complete damage system not found"), "{message}")
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(backend) => panic!("unexpected backend: {}", backend.name()),
        }
    }

    #[test]
    fn test_command_backend_from_settings() {
        let settings = BackendSettings {
            kind: BackendKind::Command,
            program: Some("car-damage".to_string()),
            ..BackendSettings::default()
        };
        let backend = backend_from_settings(&settings).unwrap();
        assert_eq!(backend.name(), "CommandBackend");
        assert!(!backend.is_simulated());
    }
}
