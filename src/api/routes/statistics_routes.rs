//! Statistics Routes

use axum::{Router, routing::get};

use crate::api::app_state::AppState;
use crate::api::handlers::statistics_handler::get_report_table;

/// 创建统计路由器
pub fn create_statistics_router() -> Router<AppState> {
    Router::new().route("/statistics/reports/:id/table", get(get_report_table))
}
