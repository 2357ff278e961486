use crate::cli::ServeArgs;
use crate::infra::{hubspot_service, AppState};
use crate::routes::with_registration_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use summit_registration::config::AppConfig;
use summit_registration::error::AppError;
use summit_registration::telemetry;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.hubspot.portal_id.is_none() {
        warn!("HUBSPOT_PORTAL_ID is not set; registrations will fail until it is configured");
    }
    if config.hubspot.private_app_token.is_none() {
        warn!("HUBSPOT_PRIVATE_APP_TOKEN is not set; summit listings will fail until it is configured");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(hubspot_service(&config.hubspot, config.pricing));

    let app = with_registration_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        pricing = config.pricing.label(),
        "summit registration service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
