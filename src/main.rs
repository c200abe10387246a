use anyhow::Context;
use archivist::api::{self, app_state::AppState};
use archivist::config::config::AppConfig;
use archivist::config::loader::{ConfigLoader, config_exists};
use archivist::observability::{
    AppMetrics, HealthCheckResult, ObservabilityState, create_observability_router, init_tracing,
};
use archivist::storage::StorageFactory;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = if config_exists() {
        ConfigLoader::load().context("failed to load configuration")?
    } else {
        AppConfig::development()
    };
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.logging);
    info!(
        "Starting {} ({})...",
        config.app_name, config.environment
    );

    let repositories =
        StorageFactory::create(&config.rest).context("failed to create repositories")?;
    info!("Repositories initialized");

    let metrics = Arc::new(AppMetrics::default());
    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics.clone(),
    ));

    let (healthy, latency_ms) = StorageFactory::health_check(&repositories.backend).await;
    if !healthy {
        warn!("Repository backend {} is not reachable", config.rest.base_url);
    }
    observability_state
        .add_health_check(HealthCheckResult {
            name: "repository".to_string(),
            healthy,
            message: config.rest.base_url.clone(),
            latency_ms,
        })
        .await;

    let app_state = AppState::new(repositories, &config, metrics);
    info!(
        "Application state created with {} follow rules",
        app_state.search_manager.follow_authority_metadata().len()
    );

    let api_router = api::initialize_api(app_state).await?;
    let mut router = create_observability_router(observability_state).merge(api_router);
    if config.server.request_timeout > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout,
        )));
    }
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
