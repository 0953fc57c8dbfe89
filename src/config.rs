use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::Level;

use crate::error::AppError;

pub const CONFIG_PATH_ENV: &str = "DAMAGE_INSPECTOR_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "damage-inspector.toml";
const ENV_PREFIX: &str = "DAMAGE_INSPECTOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Demo,
    Command,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub kind: BackendKind,
    /// External analyser executable, used when `kind = "command"`.
    pub program: Option<String>,
    /// Arguments passed before the image path.
    pub args: Vec<String>,
    /// Fixed seed for the demo backend. Random when unset.
    pub seed: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            kind: BackendKind::Demo,
            program: None,
            args: Vec::new(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub temp_suffix: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            temp_suffix: ".png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: "Car Damage Detection AI".to_string(),
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub analysis: AnalysisSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Loads settings from the file named by `DAMAGE_INSPECTOR_CONFIG` (required)
    /// or `damage-inspector.toml` (optional), then applies environment overrides.
    pub fn load() -> Result<Self, AppError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load_from(Some(Path::new(&path)), true),
            None => Self::load_from(Some(Path::new(DEFAULT_CONFIG_FILE)), false),
        }
    }

    pub fn load_from(path: Option<&Path>, required: bool) -> Result<Self, AppError> {
        Self::load_layered(path, required, None)
    }

    /// Same as [`Settings::load_from`], reading overrides from `env` instead of
    /// the process environment when given.
    pub fn load_layered(
        path: Option<&Path>,
        required: bool,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(PathBuf::from(path)).required(required));
        }
        let settings: Settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("backend.args")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !self.analysis.temp_suffix.starts_with('.') {
            return Err(AppError::Configuration(format!(
                "analysis.temp_suffix must start with '.', got {:?}",
                self.analysis.temp_suffix
            )));
        }
        self.max_level()?;
        Ok(())
    }

    pub fn max_level(&self) -> Result<Level, AppError> {
        Level::from_str(&self.logging.level).map_err(|_| {
            AppError::Configuration(format!("unknown logging.level {:?}", self.logging.level))
        })
    }
}
