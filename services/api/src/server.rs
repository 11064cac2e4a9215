use crate::assets::AssetRoot;
use crate::cli::ServeArgs;
use crate::infra::{provider_mode, AppState};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobnews::config::AppConfig;
use jobnews::error::AppError;
use jobnews::provider::HttpProviderClient;
use jobnews::search::SearchGateways;
use jobnews::telemetry;
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
    if let Some(web_root) = args.web_root.take() {
        config.web.root = web_root;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let client = Arc::new(HttpProviderClient::new()?);
    let gateways = Arc::new(SearchGateways::from_config(&config.providers, client));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = app_router(gateways.clone(), AssetRoot::new(config.web.root.clone()))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        web_root = %config.web.root.display(),
        jobs = provider_mode(gateways.jobs.is_live()),
        news = provider_mode(gateways.news.is_live()),
        "job and news gateway ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
