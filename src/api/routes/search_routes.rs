//! Search Routes

use axum::{Router, routing::get};

use crate::api::app_state::AppState;
use crate::api::handlers::search_handler::search_objects;

/// 创建检索路由器
pub fn create_search_router() -> Router<AppState> {
    Router::new().route("/search", get(search_objects))
}
