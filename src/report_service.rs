use std::any::Any;
use std::pin::Pin;

use chrono::{DateTime, Local};
use futures::task::{Context, Poll};
use futures::Future;
use image::DynamicImage;
use tower::Service;
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::analysis::gateway::AnalysisGateway;
use crate::error::AppError;
use crate::report::{render, ReportPanels};

pub struct AnalysisRequest {
    pub id: Uuid,
    pub image: Option<DynamicImage>,
}

impl AnalysisRequest {
    pub fn new(image: Option<DynamicImage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            image,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub panels: ReportPanels,
    pub completed_at: DateTime<Local>,
}

/// Runs the gateway and the renderer for one image on a blocking worker.
#[derive(Clone)]
pub struct ReportService {
    gateway: AnalysisGateway,
}

impl ReportService {
    pub fn new(gateway: AnalysisGateway) -> Self {
        Self { gateway }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "analysis backend panicked".to_string()
    }
}

impl Service<AnalysisRequest> for ReportService {
    type Response = AnalysisResponse;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: AnalysisRequest) -> Self::Future {
        let gateway = self.gateway.clone();

        Box::pin(async move {
            let AnalysisRequest { id, image } = request;
            let span = info_span!("analysis", request = %id);
            let worker_span = span.clone();
            let original = image.clone();
            span.in_scope(|| info!("Analysis requested (image: {})", image.is_some()));

            let joined = tokio::task::spawn_blocking(move || {
                let _entered = worker_span.enter();
                let outcome = gateway.analyze(image.as_ref());
                render(&outcome, image.as_ref())
            })
            .await;

            let panels = match joined {
                Ok(panels) => panels,
                Err(e) if e.is_panic() => {
                    let message = panic_message(e.into_panic());
                    span.in_scope(|| error!("Error processing image: {}", message));
                    ReportPanels::failed(&message, original.as_ref())
                }
                Err(e) => return Err(AppError::Task(e.to_string())),
            };

            span.in_scope(|| info!("Analysis finished"));
            Ok(AnalysisResponse {
                id,
                panels,
                completed_at: Local::now(),
            })
        })
    }
}
