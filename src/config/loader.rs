use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "ARCHIVIST_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序（后者覆盖前者）：
    /// 1. 内置默认值
    /// 2. ./archivist.toml
    /// 3. ./archivist.yaml
    /// 4. `ARCHIVIST_` 前缀的环境变量，嵌套字段用 `__` 分隔
    pub fn load() -> Result<AppConfig, figment::Error> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("archivist.toml"))
            .merge(Yaml::file("archivist.yaml"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.rest.base_url.is_empty() {
            return Err(ConfigValidationError::MissingRestUrl);
        }

        if config.search.default_page_size == 0 {
            return Err(ConfigValidationError::InvalidPageSize);
        }

        for rule in &config.search.follow_authority_metadata {
            if rule.entity_type.trim().is_empty() {
                return Err(ConfigValidationError::InvalidFollowRule(
                    "entity type is empty".into(),
                ));
            }
            if rule.metadata.is_empty() {
                return Err(ConfigValidationError::InvalidFollowRule(format!(
                    "no metadata fields for type {}",
                    rule.entity_type
                )));
            }
            if rule.metadata.iter().any(|m| m.trim().is_empty()) {
                return Err(ConfigValidationError::InvalidFollowRule(format!(
                    "empty metadata field for type {}",
                    rule.entity_type
                )));
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("REST 根地址未配置")]
    MissingRestUrl,

    #[error("默认分页大小无效，必须大于 0")]
    InvalidPageSize,

    #[error("跟随规则无效: {0}")]
    InvalidFollowRule(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("archivist.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists() || Path::new("archivist.yaml").exists()
}
