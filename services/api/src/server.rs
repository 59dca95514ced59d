use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryReportStorage, InMemorySessionStorage, JsonStateFile};
use crate::routes::with_desk_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use civic_report::config::AppConfig;
use civic_report::error::AppError;
use civic_report::reports::ReportDeskService;
use civic_report::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(state_path) = args.state_path.take() {
        config.storage.state_path = Some(state_path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = match config.storage.state_path.clone() {
        Some(path) => {
            info!(path = %path.display(), "using JSON state file storage");
            let storage = Arc::new(JsonStateFile::new(path));
            let desk = Arc::new(ReportDeskService::new(storage.clone(), storage));
            with_desk_routes(desk)
        }
        None => {
            info!("using in-memory storage; state is lost on exit");
            let desk = Arc::new(ReportDeskService::new(
                Arc::new(InMemoryReportStorage::default()),
                Arc::new(InMemorySessionStorage::default()),
            ));
            with_desk_routes(desk)
        }
    }
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "civic report desk ready");

    axum::serve(listener, app).await?;
    Ok(())
}
