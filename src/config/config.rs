use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

/// 后端 REST 接口配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RestConfig {
    /// REST 根地址，例如 `https://repo.example.org/server/api`；
    /// 取值 `memory` 时使用内存仓储
    pub base_url: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// User-Agent 头
    pub user_agent: String,
}

impl RestConfig {
    /// 是否使用内存仓储
    pub fn is_memory(&self) -> bool {
        self.base_url == "memory"
    }
}

/// 共享对象缓存配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// 缓存条目存活时间（毫秒）
    pub ms_to_live: u64,
    /// 最大条目数
    pub max_entries: usize,
}

/// 关联元数据跟随规则
///
/// 对于实体类型为 `entity_type` 的条目，`metadata` 中字段所携带的
/// authority 将在搜索/浏览完成后被批量预取。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowAuthorityMetadata {
    /// 实体类型标签，例如 `Publication`
    #[serde(rename = "type")]
    pub entity_type: String,
    /// 需要跟随的元数据字段（有序）
    pub metadata: Vec<String>,
}

impl FollowAuthorityMetadata {
    pub fn new(entity_type: &str, metadata: &[&str]) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            metadata: metadata.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// 跟随规则表，启动时加载，运行期只读
    pub follow_authority_metadata: Vec<FollowAuthorityMetadata>,
    /// 默认分页大小
    pub default_page_size: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// REST 配置
    pub rest: RestConfig,
    /// 缓存配置
    pub cache: CacheConfig,
    /// 搜索配置
    pub search: SearchConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 30,
            },
            rest: RestConfig {
                base_url: "http://localhost:8080/server/api".into(),
                timeout_secs: 30,
                user_agent: "archivist/0.1".into(),
            },
            cache: CacheConfig {
                ms_to_live: 15 * 60 * 1000,
                max_entries: 10_000,
            },
            search: SearchConfig {
                follow_authority_metadata: vec![
                    FollowAuthorityMetadata::new("Publication", &["dc.contributor.author"]),
                    FollowAuthorityMetadata::new("Product", &["dc.contributor.author"]),
                ],
                default_page_size: 10,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "archivist".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_follow_rules() {
        let config = AppConfig::development();
        let types: Vec<_> = config
            .search
            .follow_authority_metadata
            .iter()
            .map(|f| f.entity_type.as_str())
            .collect();
        assert_eq!(types, vec!["Publication", "Product"]);
        assert!(!config.rest.is_memory());
    }

    #[test]
    fn test_production_overrides() {
        let config = AppConfig::production();
        assert_eq!(config.environment, "production");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.structured);
    }

    #[test]
    fn test_follow_rule_serde_uses_type_key() {
        let rule: FollowAuthorityMetadata =
            serde_json::from_str(r#"{"type":"Person","metadata":["dc.contributor.author"]}"#)
                .unwrap();
        assert_eq!(rule.entity_type, "Person");
        assert_eq!(rule.metadata, vec!["dc.contributor.author"]);
    }
}
