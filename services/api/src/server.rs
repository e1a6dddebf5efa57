use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryScenarioRepository};
use crate::routes::simulator_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cpo_sim::config::AppConfig;
use cpo_sim::error::AppError;
use cpo_sim::simulator::memo::MemoService;
use cpo_sim::simulator::scenarios::ScenarioService;
use cpo_sim::telemetry;
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

    let scenarios = Arc::new(ScenarioService::new(InMemoryScenarioRepository::seeded()));
    let memo = Arc::new(MemoService::new());

    let app = simulator_routes(scenarios, memo)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "policy simulator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
