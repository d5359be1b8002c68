use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use poultry_dx::config::AppConfig;
use poultry_dx::diagnosis::{DiagnosisService, SimulatedEvidenceExtractor};
use poultry_dx::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let knowledge = Arc::new(config.diagnosis.knowledge_base()?);
    let extractor = Arc::new(SimulatedEvidenceExtractor::new(
        config.diagnosis.extractor_seed,
        &knowledge,
    ));
    let diseases = knowledge.diseases().len();
    let service = Arc::new(DiagnosisService::new(knowledge, extractor));

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, diseases, "poultry diagnosis service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
