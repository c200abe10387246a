//! Archivist - 仓储前端服务
//!
//! 位于仓储 REST 后端之前，提供浏览与检索编排：对结果页中引用的关联
//! 实体做一次批量预取，预热共享缓存；此外提供 ORCID 解绑、URI 元数据
//! 链接和使用统计表格。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
