//! DTO 模块
//!
//! 定义 API 请求和响应的数据结构。

pub mod browse_dto;
pub mod item_dto;
pub mod search_dto;

pub use browse_dto::*;
pub use item_dto::*;
pub use search_dto::*;
