use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAuditSink, InMemoryCaseRepository};
use crate::routes::with_case_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use immigr_pro::cases::CaseService;
use immigr_pro::config::AppConfig;
use immigr_pro::eligibility::EligibilityEngine;
use immigr_pro::error::AppError;
use immigr_pro::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCaseRepository::default());
    let audit = Arc::new(InMemoryAuditSink::default());
    let case_service = Arc::new(CaseService::new(
        repository,
        audit,
        EligibilityEngine::default(),
        config.cases,
    ));

    let app = with_case_routes(case_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "eligibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
