//! 存储工厂模块
//!
//! 根据配置创建内存或 REST 仓储。

use std::sync::Arc;
use std::time::Instant;

use crate::config::config::RestConfig;
use crate::error::Result;
use crate::models::RemoteData;
use crate::storage::memory::InMemoryRepository;
use crate::storage::repository::{
    BrowseRepository, ItemRepository, ObjectRepository, ResearcherProfileRepository,
    SearchRepository, UsageReportRepository,
};
use crate::storage::rest::{
    RestBrowseRepository, RestClient, RestItemRepository, RestObjectRepository,
    RestProfileRepository, RestSearchRepository, RestUsageReportRepository,
};

/// 存储后端
#[derive(Clone, Debug)]
pub enum StorageBackend {
    Memory(Arc<InMemoryRepository>),
    Rest(RestClient),
}

/// 一组仓储实例
#[derive(Clone)]
pub struct Repositories {
    pub backend: StorageBackend,
    pub items: Arc<dyn ItemRepository>,
    pub browse: Arc<dyn BrowseRepository>,
    pub search: Arc<dyn SearchRepository>,
    pub objects: Arc<dyn ObjectRepository>,
    pub profiles: Arc<dyn ResearcherProfileRepository>,
    pub usage_reports: Arc<dyn UsageReportRepository>,
}

impl Repositories {
    /// 全部由同一个内存仓储提供
    pub fn in_memory(repo: Arc<InMemoryRepository>) -> Self {
        Self {
            backend: StorageBackend::Memory(repo.clone()),
            items: repo.clone(),
            browse: repo.clone(),
            search: repo.clone(),
            objects: repo.clone(),
            profiles: repo.clone(),
            usage_reports: repo,
        }
    }

    pub fn rest(client: RestClient) -> Self {
        Self {
            backend: StorageBackend::Rest(client.clone()),
            items: Arc::new(RestItemRepository::new(client.clone())),
            browse: Arc::new(RestBrowseRepository::new(client.clone())),
            search: Arc::new(RestSearchRepository::new(client.clone())),
            objects: Arc::new(RestObjectRepository::new(client.clone())),
            profiles: Arc::new(RestProfileRepository::new(client.clone())),
            usage_reports: Arc::new(RestUsageReportRepository::new(client)),
        }
    }
}

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建仓储；`base_url = "memory"` 时使用内存仓储
    pub fn create(config: &RestConfig) -> Result<Repositories> {
        if config.is_memory() {
            tracing::info!("Using in-memory repositories");
            return Ok(Repositories::in_memory(Arc::new(InMemoryRepository::new())));
        }
        tracing::info!("Using REST repositories at {}", config.base_url);
        Ok(Repositories::rest(RestClient::new(config)?))
    }

    /// 检查存储是否可用，返回是否可用和耗时（毫秒）
    pub async fn health_check(backend: &StorageBackend) -> (bool, u64) {
        let start = Instant::now();
        let healthy = match backend {
            StorageBackend::Memory(_) => true,
            StorageBackend::Rest(client) => {
                let rd: RemoteData<serde_json::Value> = client.get("", &[]).await;
                rd.has_succeeded()
            }
        };
        (healthy, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_memory_backend_selected() {
        let repos = StorageFactory::create(&RestConfig {
            base_url: "memory".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(repos.backend, StorageBackend::Memory(_)));
    }

    #[test]
    fn test_empty_url_is_config_error() {
        assert!(StorageFactory::create(&RestConfig::default()).is_err());
    }

    #[tokio::test]
    async fn test_rest_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"type": "root"})))
            .mount(&server)
            .await;

        let repos = StorageFactory::create(&RestConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap();
        let (healthy, _) = StorageFactory::health_check(&repos.backend).await;
        assert!(healthy);
    }
}
