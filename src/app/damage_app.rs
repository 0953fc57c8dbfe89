use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError as MpscTryRecvError;
use tower::ServiceExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::app::views::results_view::ResultsView;
use crate::app::views::upload_view::{UploadEvent, UploadView};
use crate::app::views::View;
use crate::config::UiSettings;
use crate::error::AppError;
use crate::report_service::{AnalysisRequest, AnalysisResponse, ReportService};

pub enum UiUpdate {
    Analysis(Uuid, Result<AnalysisResponse, AppError>),
}

enum UploadSource {
    Path(PathBuf),
    Bytes(String, Arc<[u8]>),
}

const MAX_LOGGED_ERRORS: usize = 100;

/// Most recent errors shown in the log panel. Older entries are dropped once full.
struct ErrorLog {
    entries: VecDeque<AppError>,
    capacity: usize,
}

impl ErrorLog {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, error: AppError) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(error);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn newest_first(&self) -> impl Iterator<Item = &AppError> {
        self.entries.iter().rev()
    }
}

pub struct DamageApp {
    runtime: Handle,
    service: ReportService,
    simulated: bool,
    upload_view: UploadView,
    results_view: ResultsView,
    current_image: Option<DynamicImage>,
    pending_request: Option<Uuid>,
    ui_update_tx: mpsc::Sender<UiUpdate>,
    ui_update_rx: mpsc::Receiver<UiUpdate>,
    errors: ErrorLog,
}

impl DamageApp {
    pub fn new(runtime: Handle, service: ReportService, simulated: bool) -> Self {
        let (ui_update_tx, ui_update_rx) = mpsc::channel::<UiUpdate>(16);
        Self {
            runtime,
            service,
            simulated,
            upload_view: UploadView::new(),
            results_view: ResultsView::new(),
            current_image: None,
            pending_request: None,
            ui_update_tx,
            ui_update_rx,
            errors: ErrorLog::with_capacity(MAX_LOGGED_ERRORS),
        }
    }

    pub fn start_gui(
        settings: &UiSettings,
        service: ReportService,
        simulated: bool,
    ) -> Result<(), AppError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(settings.width, settings.height))
                .with_title(settings.title.clone())
                .with_drag_and_drop(true),
            ..Default::default()
        };

        let runtime = Handle::current();
        if simulated {
            info!("Launching DEMO version of Car Damage Detection App, results are simulated");
        }

        eframe::run_native(
            &settings.title,
            options,
            Box::new(move |_cc| Ok(Box::new(DamageApp::new(runtime, service, simulated)))),
        )
        .map_err(|e| AppError::Ui(e.to_string()))
    }

    fn load_image(&mut self, ctx: &egui::Context, source: UploadSource) {
        let decoded = match &source {
            UploadSource::Path(path) => image::open(path),
            UploadSource::Bytes(_, bytes) => image::load_from_memory(bytes),
        };

        match decoded {
            Ok(image) => {
                match &source {
                    UploadSource::Path(path) => info!("Loaded image {}", path.display()),
                    UploadSource::Bytes(name, _) => info!("Loaded dropped image {}", name),
                }
                self.upload_view.set_image(ctx, &image);
                self.current_image = Some(image);
                // A new upload is analyzed right away.
                self.start_analysis(ctx);
            }
            Err(e) => {
                warn!("Could not read uploaded image: {}", e);
                self.errors.push(AppError::Image(e));
            }
        }
    }

    fn start_analysis(&mut self, ctx: &egui::Context) {
        let request = AnalysisRequest::new(self.current_image.clone());
        let id = request.id;
        self.pending_request = Some(id);
        self.upload_view.set_busy(true);

        let service = self.service.clone();
        let tx = self.ui_update_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = service.oneshot(request).await;
            if let Err(e) = tx.send(UiUpdate::Analysis(id, result)).await {
                error!("Error sending analysis result to UI: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn dropped_images(ctx: &egui::Context) -> Vec<UploadSource> {
        ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| match (&file.path, &file.bytes) {
                    (Some(path), _) => Some(UploadSource::Path(path.clone())),
                    (None, Some(bytes)) => Some(UploadSource::Bytes(file.name.clone(), bytes.clone())),
                    (None, None) => None,
                })
                .collect()
        })
    }

    fn receive_updates(&mut self, ctx: &egui::Context) {
        loop {
            match self.ui_update_rx.try_recv() {
                Ok(UiUpdate::Analysis(id, result)) => {
                    if self.pending_request != Some(id) {
                        debug!("Dropping stale analysis result {}", id);
                        continue;
                    }
                    self.pending_request = None;
                    self.upload_view.set_busy(false);
                    match result {
                        Ok(response) => self.results_view.set_response(ctx, response),
                        Err(e) => {
                            error!("Analysis request failed: {}", e);
                            self.errors.push(e);
                        }
                    }
                }
                Err(MpscTryRecvError::Empty) => break,
                Err(MpscTryRecvError::Disconnected) => {
                    self.errors
                        .push(AppError::Ui("Analysis result channel disconnected".to_string()));
                    break;
                }
            }
        }
    }
}

impl eframe::App for DamageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.receive_updates(ctx);

        // Only the first dropped file is used.
        if let Some(source) = Self::dropped_images(ctx).into_iter().next() {
            self.load_image(ctx, source);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Car Damage Detection & Cost Estimation");
                ui.label(
                    "Upload a photo of your car to get instant damage analysis and repair cost estimates",
                );
                if self.simulated {
                    ui.colored_label(
                        egui::Color32::LIGHT_BLUE,
                        "Demo mode: this is a demonstration with simulated results.",
                    );
                }
            });
        });

        egui::TopBottomPanel::bottom("error_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Error Log");
                    if ui.button("Clear").clicked() {
                        self.errors.clear();
                    }
                });
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for error in self.errors.newest_first() {
                        ui.label(format!("[ERROR] {}", error));
                    }
                });
            });

        let mut event = None;
        egui::SidePanel::left("upload_panel")
            .resizable(true)
            .default_width(400.0)
            .show(ctx, |ui| {
                event = self.upload_view.show(ui);
            });

        match event {
            Some(UploadEvent::LoadPath(path)) => self.load_image(ctx, UploadSource::Path(path)),
            Some(UploadEvent::Analyze) => self.start_analysis(ctx),
            None => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.results_view.draw(ui);
        });
    }
}
