pub mod backend;
pub mod command_backend;
pub mod demo_backend;
pub mod gateway;
pub mod types;

pub use backend::{backend_from_settings, DamageBackend};
pub use command_backend::CommandBackend;
pub use demo_backend::DemoBackend;
pub use gateway::{AnalysisGateway, AnalysisOutcome};
pub use types::{AnalysisResult, CostAnalysis, DamageRecord, DamageType, Severity};
