//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::error::AppError;
use crate::observability::metrics_middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let metrics = app_state.metrics.clone();
    let api = Router::new()
        .merge(routes::browse_routes::create_browse_router())
        .merge(routes::search_routes::create_search_router())
        .merge(routes::item_routes::create_item_router())
        .merge(routes::statistics_routes::create_statistics_router());

    Router::new()
        .nest("/api/v1", api)
        .layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                metrics_middleware(req, next, metrics.clone())
            },
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

pub async fn initialize_api(app_state: AppState) -> Result<Router, AppError> {
    tracing::info!("Initializing API router...");
    Ok(create_router(app_state))
}
