//! Handlers 模块
//!
//! API 请求处理函数。

pub mod browse_handler;
pub mod item_handler;
pub mod search_handler;
pub mod statistics_handler;
