use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Configuration(String),
    #[error("Failed to load configuration: {0}")]
    ConfigSource(#[from] config::ConfigError),
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Malformed analysis result: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Backend(String),
    #[error("Analysis task failed: {0}")]
    Task(String),
    #[error("UI Error: {0}")]
    Ui(String),
}

// Annotation Error Type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("Image of {width}x{height} is too small for damage labels (needs more than 200x150)")]
    ImageTooSmall { width: u32, height: u32 },
}
