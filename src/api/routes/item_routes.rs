//! Item Routes
//!
//! 条目缓存、ORCID 与 URI 链接相关路由。

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;
use crate::api::handlers::item_handler::*;

/// 创建条目路由器
pub fn create_item_router() -> Router<AppState> {
    Router::new()
        .route("/cache/items/:id", get(get_cached_item))
        .route("/items/:id/orcid", get(get_orcid_status))
        .route("/items/:id/orcid/unlink", post(unlink_orcid))
        .route("/items/:id/links", get(get_uri_links))
}
