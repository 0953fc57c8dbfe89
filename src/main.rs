use damage_inspector::analysis::{backend_from_settings, AnalysisGateway};
use damage_inspector::app::DamageApp;
use damage_inspector::config::Settings;
use damage_inspector::error::AppError;
use damage_inspector::report_service::ReportService;
use tracing::{error, Level};

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = Settings::load()?;
    init_logging(settings.max_level()?);

    let backend = backend_from_settings(&settings.backend).inspect_err(|e| {
        error!("{}", e);
        error!("Configure backend.program or use backend.kind = \"demo\".");
    })?;
    let simulated = backend.is_simulated();
    let gateway = AnalysisGateway::new(backend, settings.analysis.temp_suffix.clone());

    DamageApp::start_gui(&settings.ui, ReportService::new(gateway), simulated)
}
