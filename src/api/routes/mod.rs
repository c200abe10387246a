//! Routes 模块
//!
//! 定义 API 路由。

pub mod browse_routes;
pub mod item_routes;
pub mod search_routes;
pub mod statistics_routes;
