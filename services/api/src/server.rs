use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_bonus_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rentdesk::config::AppConfig;
use rentdesk::error::AppError;
use rentdesk::telemetry;
use rentdesk::workflows::bonus::BonusApiState;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let bonus_state = Arc::new(BonusApiState::new(config.bonus.formatter()));

    let app = with_bonus_routes(bonus_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        separator = %config.bonus.thousands_separator,
        "rentdesk bonus service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
