use crate::cli::ServeArgs;
use crate::infra::{seed_store, AppState};
use crate::routes::with_poll_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use polls::config::AppConfig;
use polls::error::AppError;
use polls::polls::{Clock, InMemoryQuestionStore, PollService, SystemClock};
use polls::telemetry;
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
    if let Some(path) = args.seed_csv.take() {
        config.polls.seed_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryQuestionStore::new());
    let clock = Arc::new(SystemClock);
    if let Some(path) = config.polls.seed_path.as_deref() {
        seed_store(store.as_ref(), path, clock.now())?;
    }
    let poll_service = Arc::new(PollService::new(store, clock));

    let app = with_poll_routes(poll_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "polls service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
