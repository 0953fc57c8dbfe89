use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::analysis::backend::DamageBackend;
use crate::analysis::types::AnalysisResult;
use crate::error::AppError;

/// Adapter for an external analysis program.
///
/// The program is run as `<program> <args..> <image path>` and must print the
/// analysis result as JSON on stdout. A `null` document means nothing was found.
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
}

impl CommandBackend {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl DamageBackend for CommandBackend {
    fn analyze_car_damage(&self, image_path: &Path) -> Result<AnalysisResult, AppError> {
        debug!("Running {} {:?} {}", self.program, self.args, image_path.display());

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(image_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| AppError::Backend(format!("failed to start {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Backend(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let result: Option<AnalysisResult> = serde_json::from_slice(&output.stdout)?;
        Ok(result.unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "CommandBackend"
    }
}
