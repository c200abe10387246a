//! 检索/浏览结果的关联数据预取
//!
//! [`SearchManager`] 在浏览和检索之后，按配置的跟随规则收集结果页中
//! 条目引用的 authority，一次性批量获取这些关联条目。获取结果只用于
//! 预热共享缓存，返回给调用方的结果页保持原样。
//!
//! 流程：
//! 1. 结果不是成功状态（进行中、失败、已过期）时原样转发
//! 2. 解包结果页中的条目，提交记录取其内嵌条目
//! 3. 对实体类型匹配的规则，收集规则字段上非空的 authority
//! 4. 去重；为空时不发请求
//! 5. 否则发起一次 `find_all_by_id`，无论成功失败都继续
//! 6. 返回原始结果

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::FollowAuthorityMetadata;
use crate::models::{
    BrowseEntrySearchOptions, Item, PaginatedList, PaginatedSearchOptions, RemoteData,
    ResultPage, SearchObjects,
};
use crate::observability::{AppMetrics, EnrichmentOutcome};
use crate::storage::repository::{BrowseRepository, ItemRepository, SearchRepository};

/// 浏览/检索编排服务
pub struct SearchManager {
    item_repository: Arc<dyn ItemRepository>,
    browse_repository: Arc<dyn BrowseRepository>,
    search_repository: Arc<dyn SearchRepository>,
    follow_authority_metadata: Arc<[FollowAuthorityMetadata]>,
    metrics: Arc<AppMetrics>,
}

impl SearchManager {
    pub fn new(
        item_repository: Arc<dyn ItemRepository>,
        browse_repository: Arc<dyn BrowseRepository>,
        search_repository: Arc<dyn SearchRepository>,
        follow_authority_metadata: Arc<[FollowAuthorityMetadata]>,
    ) -> Self {
        Self {
            item_repository,
            browse_repository,
            search_repository,
            follow_authority_metadata,
            metrics: Arc::new(AppMetrics::default()),
        }
    }

    /// 使用共享的指标实例
    pub fn with_metrics(mut self, metrics: Arc<AppMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn follow_authority_metadata(&self) -> &[FollowAuthorityMetadata] {
        &self.follow_authority_metadata
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    /// 浏览与某个元数据值关联的条目，并预取关联数据
    pub async fn get_browse_items_for(
        &self,
        filter_value: &str,
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>> {
        let rd = self
            .browse_repository
            .get_browse_items_for(filter_value, options)
            .await;
        self.complete_with_extra_data(rd).await
    }

    /// 浏览与某个 authority 关联的条目，并预取关联数据
    pub async fn get_browse_items_for_authority(
        &self,
        filter_authority: &str,
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>> {
        let rd = self
            .browse_repository
            .get_browse_items_for_authority(filter_authority, options)
            .await;
        self.complete_with_extra_data(rd).await
    }

    /// 检索，并对命中对象预取关联数据
    pub async fn search(&self, options: &PaginatedSearchOptions) -> RemoteData<SearchObjects> {
        let rd = self.search_repository.search(options).await;
        self.complete_with_extra_data(rd).await
    }

    /// 成功状态的结果先完成预取再转发；其他状态直接转发
    pub async fn complete_with_extra_data<P: ResultPage>(&self, rd: RemoteData<P>) -> RemoteData<P> {
        if !rd.is_success() {
            debug!("Skipping enrichment for result in state {:?}", rd.state);
            self.metrics
                .record_enrichment(EnrichmentOutcome::SkippedState);
            return rd;
        }

        match rd.payload() {
            Some(page) => self.enrich(page).await,
            None => {
                debug!("Skipping enrichment for empty response");
                self.metrics
                    .record_enrichment(EnrichmentOutcome::SkippedEmpty);
            }
        }
        rd
    }

    /// 批量获取结果页引用的关联条目
    ///
    /// 获取失败只记录日志，不影响调用方。
    pub async fn enrich<P: ResultPage + ?Sized>(&self, page: &P) {
        let items = page.page_items();
        let keys = Self::extract_authority_keys(&items, &self.follow_authority_metadata);

        if keys.is_empty() {
            debug!("No authorities to follow in {} entries", items.len());
            self.metrics
                .record_enrichment(EnrichmentOutcome::SkippedEmpty);
            return;
        }

        debug!(
            "Fetching {} related items for {} entries",
            keys.len(),
            items.len()
        );
        self.metrics.record_ids_requested(keys.len());

        let rd = self.item_repository.find_all_by_id(&keys).await;
        if rd.has_succeeded() {
            self.metrics.record_enrichment(EnrichmentOutcome::Fetched);
        } else {
            warn!(
                "Batch fetch of {} related items failed (status {:?}): {}",
                keys.len(),
                rd.status_code,
                rd.error_message.as_deref().unwrap_or("no message")
            );
            self.metrics.record_enrichment(EnrichmentOutcome::Failed);
        }
    }

    /// 收集需要跟随的 authority，按首次出现顺序去重
    pub fn extract_authority_keys(
        items: &[&Item],
        rules: &[FollowAuthorityMetadata],
    ) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();

        for item in items {
            let Some(entity_type) = item.entity_type() else {
                continue;
            };
            for rule in rules.iter().filter(|r| r.entity_type == entity_type) {
                for field in &rule.metadata {
                    for value in item.all_metadata(&[field.as_str()]) {
                        if let Some(key) = value.authority_key() {
                            if seen.insert(key) {
                                keys.push(key.to_string());
                            }
                        }
                    }
                }
            }
        }

        keys
    }
}
