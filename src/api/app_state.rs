use std::sync::Arc;

use crate::config::{AppConfig, FollowAuthorityMetadata};
use crate::observability::AppMetrics;
use crate::services::orcid::{OrcidService, create_orcid_service};
use crate::services::search_manager::SearchManager;
use crate::services::statistics::StatisticsTableService;
use crate::storage::cache::{CachingItemRepository, ObjectCache};
use crate::storage::factory::Repositories;
use crate::storage::memory::InMemoryRepository;
use crate::storage::repository::{ItemRepository, UsageReportRepository};

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Browse/search orchestration with related-item prefetch
    pub search_manager: Arc<SearchManager>,
    /// Item repository writing through the shared object cache
    pub item_repository: Arc<dyn ItemRepository>,
    /// Shared object cache warmed by prefetching
    pub object_cache: Arc<ObjectCache>,
    pub orcid_service: Arc<dyn OrcidService>,
    pub statistics_service: Arc<StatisticsTableService>,
    pub usage_report_repository: Arc<dyn UsageReportRepository>,
    pub metrics: Arc<AppMetrics>,
    /// Page size used when a request does not give one
    pub default_page_size: u32,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("search_manager", &"Arc<SearchManager>")
            .field("item_repository", &"Arc<dyn ItemRepository>")
            .field("object_cache", &self.object_cache)
            .field("orcid_service", &"Arc<dyn OrcidService>")
            .field("statistics_service", &"Arc<StatisticsTableService>")
            .field("usage_report_repository", &"Arc<dyn UsageReportRepository>")
            .field("default_page_size", &self.default_page_size)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(repositories: Repositories, config: &AppConfig, metrics: Arc<AppMetrics>) -> Self {
        let object_cache = Arc::new(ObjectCache::from_config(&config.cache));
        let item_repository: Arc<dyn ItemRepository> = Arc::new(CachingItemRepository::new(
            repositories.items.clone(),
            object_cache.clone(),
        ));

        let follow_authority_metadata: Arc<[FollowAuthorityMetadata]> =
            Arc::from(config.search.follow_authority_metadata.clone());

        let search_manager = SearchManager::new(
            item_repository.clone(),
            repositories.browse.clone(),
            repositories.search.clone(),
            follow_authority_metadata,
        )
        .with_metrics(metrics.clone());

        Self {
            search_manager: Arc::new(search_manager),
            item_repository,
            object_cache,
            orcid_service: Arc::from(create_orcid_service(repositories.profiles.clone())),
            statistics_service: Arc::new(StatisticsTableService::new(
                repositories.objects.clone(),
            )),
            usage_report_repository: repositories.usage_reports,
            metrics,
            default_page_size: config.search.default_page_size,
        }
    }

    /// Create development application state backed by an in-memory repository
    pub fn development(repo: Arc<InMemoryRepository>) -> Self {
        Self::new(
            Repositories::in_memory(repo),
            &AppConfig::development(),
            Arc::new(AppMetrics::default()),
        )
    }
}
