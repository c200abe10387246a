//! Browse Routes

use axum::{Router, routing::get};

use crate::api::app_state::AppState;
use crate::api::handlers::browse_handler::browse_items;

/// 创建浏览路由器
pub fn create_browse_router() -> Router<AppState> {
    Router::new().route("/browse/:definition/items", get(browse_items))
}
