//! 配置管理模块
//!
//! 提供应用程序配置加载和管理功能，支持 TOML/YAML 配置文件和环境变量覆盖。

pub mod config;
pub mod loader;

pub use config::{AppConfig, FollowAuthorityMetadata};
pub use loader::ConfigLoader;
