//! 内存仓储
//!
//! [`InMemoryRepository`] 在进程内保存条目、容器对象、研究者档案和统计报表，
//! 实现全部仓储 trait，用于开发模式和测试。数据随实例释放而丢失。

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::item::{ContainerObject, ORCID_AUTHENTICATED_FIELD};
use crate::models::{
    BrowseEntrySearchOptions, Item, PageInfo, PaginatedList, PaginatedSearchOptions,
    PaginationOptions, RemoteData, RepositoryObject, ResearcherProfile, SearchObjects,
    SearchResult, UsageReport,
};
use crate::storage::repository::{
    BrowseRepository, ItemRepository, ObjectRepository, ResearcherProfileRepository,
    SearchRepository, UsageReportRepository,
};

/// 内存仓储
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    items: DashMap<String, Item>,
    containers: DashMap<String, RepositoryObject>,
    profiles: DashMap<String, ResearcherProfile>,
    reports: DashMap<String, UsageReport>,
    batch_calls: Mutex<Vec<Vec<String>>>,
    fail_batches: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&self, item: Item) {
        self.items.insert(item.uuid.clone(), item);
    }

    pub fn insert_collection(&self, collection: ContainerObject) {
        self.containers.insert(
            collection.uuid.clone(),
            RepositoryObject::Collection(collection),
        );
    }

    pub fn insert_community(&self, community: ContainerObject) {
        self.containers
            .insert(community.uuid.clone(), RepositoryObject::Community(community));
    }

    pub fn insert_profile(&self, profile: ResearcherProfile) {
        self.profiles.insert(profile.id.clone(), profile);
    }

    pub fn insert_report(&self, report: UsageReport) {
        self.reports.insert(report.id.clone(), report);
    }

    /// 让后续的批量获取全部失败
    pub fn fail_batch_fetches(&self, fail: bool) {
        self.fail_batches.store(fail, Ordering::SeqCst);
    }

    /// 已发生的批量获取调用（每次调用的 ID 列表）
    pub fn batch_calls(&self) -> Vec<Vec<String>> {
        self.batch_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// 按 UUID 排序的全部条目，保证分页稳定
    fn sorted_items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| a.uuid.cmp(&b.uuid));
        items
    }

    fn browse_fields(definition: &str) -> Vec<&'static str> {
        match definition {
            "author" => vec!["dc.contributor.*", "dc.creator"],
            "subject" => vec!["dc.subject.*", "dc.subject"],
            "title" => vec!["dc.title"],
            "dateissued" => vec!["dc.date.issued"],
            _ => vec!["*"],
        }
    }

    fn browse(
        &self,
        options: &BrowseEntrySearchOptions,
        matches: impl Fn(&crate::models::MetadataValue) -> bool,
    ) -> RemoteData<PaginatedList<Item>> {
        let fields = Self::browse_fields(&options.metadata_definition);
        let found: Vec<Item> = self
            .sorted_items()
            .into_iter()
            .filter(|item| {
                item.all_metadata(&fields)
                    .into_iter()
                    .any(|value| matches(value))
            })
            .collect();
        RemoteData::success(paginate(found, &options.pagination))
    }
}

/// 对内存结果分页
pub fn paginate<T>(all: Vec<T>, pagination: &PaginationOptions) -> PaginatedList<T> {
    let total = all.len();
    let size = pagination.page_size.max(1) as usize;
    let current = pagination.current_page.max(1);
    let start = (current as usize - 1) * size;
    let page: Vec<T> = all.into_iter().skip(start).take(size).collect();
    PaginatedList::new(
        PageInfo {
            elements_per_page: size as u32,
            total_elements: total as u64,
            total_pages: total.div_ceil(size) as u32,
            current_page: current,
        },
        page,
    )
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn find_by_id(&self, id: &str) -> RemoteData<Item> {
        match self.items.get(id) {
            Some(item) => RemoteData::success(item.clone()),
            None => RemoteData::error(404, format!("item {} not found", id)),
        }
    }

    async fn find_all_by_id(&self, ids: &[String]) -> RemoteData<Vec<Item>> {
        if let Ok(mut calls) = self.batch_calls.lock() {
            calls.push(ids.to_vec());
        }
        if self.fail_batches.load(Ordering::SeqCst) {
            return RemoteData::error(500, "batch fetch failed");
        }
        let found = ids
            .iter()
            .filter_map(|id| self.items.get(id).map(|item| item.clone()))
            .collect();
        RemoteData::success(found)
    }
}

#[async_trait]
impl BrowseRepository for InMemoryRepository {
    async fn get_browse_items_for(
        &self,
        filter_value: &str,
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>> {
        self.browse(options, |value| value.value == filter_value)
    }

    async fn get_browse_items_for_authority(
        &self,
        filter_authority: &str,
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>> {
        self.browse(options, |value| value.authority_key() == Some(filter_authority))
    }
}

#[async_trait]
impl SearchRepository for InMemoryRepository {
    async fn search(&self, options: &PaginatedSearchOptions) -> RemoteData<SearchObjects> {
        let query = options
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty() && q != "*");

        let found: Vec<SearchResult> = self
            .sorted_items()
            .into_iter()
            .filter(|item| {
                options.filters.iter().all(|filter| {
                    let fields = Self::browse_fields(&filter.key);
                    item.all_metadata(&fields)
                        .into_iter()
                        .any(|v| filter.values.iter().any(|wanted| &v.value == wanted))
                })
            })
            .filter(|item| match &query {
                None => true,
                Some(q) => {
                    item.name.to_lowercase().contains(q)
                        || item
                            .all_metadata(&["*"])
                            .into_iter()
                            .any(|v| v.value.to_lowercase().contains(q))
                }
            })
            .map(SearchResult::new)
            .collect();

        RemoteData::success(SearchObjects {
            scope: options.scope.clone(),
            configuration: options.configuration.clone(),
            results: paginate(found, &options.pagination),
        })
    }
}

#[async_trait]
impl ObjectRepository for InMemoryRepository {
    async fn find_by_id(&self, id: &str) -> RemoteData<RepositoryObject> {
        if let Some(item) = self.items.get(id) {
            return RemoteData::success(RepositoryObject::Item(item.clone()));
        }
        match self.containers.get(id) {
            Some(object) => RemoteData::success(object.clone()),
            None => RemoteData::error(404, format!("object {} not found", id)),
        }
    }
}

#[async_trait]
impl ResearcherProfileRepository for InMemoryRepository {
    async fn find_by_id(&self, id: &str) -> RemoteData<ResearcherProfile> {
        match self.profiles.get(id) {
            Some(profile) => RemoteData::success(profile.clone()),
            None => RemoteData::error(404, format!("profile {} not found", id)),
        }
    }

    async fn unlink_orcid(&self, profile_id: &str) -> RemoteData<ResearcherProfile> {
        let Some(profile) = self.profiles.get(profile_id).map(|p| p.clone()) else {
            return RemoteData::error(404, format!("profile {} not found", profile_id));
        };
        if let Some(item_id) = &profile.item_id {
            if let Some(mut item) = self.items.get_mut(item_id) {
                item.metadata.remove(ORCID_AUTHENTICATED_FIELD);
            }
        }
        RemoteData::success(profile)
    }
}

#[async_trait]
impl UsageReportRepository for InMemoryRepository {
    async fn find_by_id(&self, report_id: &str) -> RemoteData<UsageReport> {
        match self.reports.get(report_id) {
            Some(report) => RemoteData::success(report.clone()),
            None => RemoteData::error(404, format!("report {} not found", report_id)),
        }
    }
}
