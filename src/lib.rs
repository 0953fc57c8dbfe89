pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod report;
pub mod report_service;

pub use analysis::{AnalysisGateway, AnalysisOutcome, DamageBackend};
pub use config::Settings;
pub use error::{AnnotationError, AppError};
pub use report::ReportPanels;
pub use report_service::{AnalysisRequest, AnalysisResponse, ReportService};
