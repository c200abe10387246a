//! 共享对象缓存
//!
//! 检索/浏览后的关联数据预取只负责把条目写入这里；展示层随后按 UUID
//! 从缓存读取，而不是逐行请求后端。

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::config::CacheConfig;
use crate::models::{Item, RemoteData};
use crate::storage::repository::ItemRepository;

#[derive(Debug, Clone)]
struct CachedItem {
    item: Item,
    cached_at: Instant,
}

/// 条目缓存，带存活时间和容量上限
#[derive(Debug)]
pub struct ObjectCache {
    entries: DashMap<String, CachedItem>,
    ttl: Duration,
    max_entries: usize,
}

impl ObjectCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_millis(config.ms_to_live), config.max_entries)
    }

    fn is_expired(&self, entry: &CachedItem) -> bool {
        entry.cached_at.elapsed() >= self.ttl
    }

    /// 写入条目；容量已满时先清理过期条目，再淘汰最早写入的条目
    pub fn put(&self, item: Item) {
        if !self.entries.contains_key(&item.uuid) && self.entries.len() >= self.max_entries {
            self.evict_expired();
            if self.entries.len() >= self.max_entries {
                self.evict_oldest();
            }
        }
        self.entries.insert(
            item.uuid.clone(),
            CachedItem {
                item,
                cached_at: Instant::now(),
            },
        );
    }

    pub fn put_all(&self, items: impl IntoIterator<Item = Item>) {
        for item in items {
            self.put(item);
        }
    }

    /// 读取未过期的条目；过期条目在读取时移除
    pub fn get(&self, id: &str) -> Option<Item> {
        let expired = match self.entries.get(id) {
            Some(entry) if !self.is_expired(&entry) => return Some(entry.item.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(id);
        }
        None
    }

    /// 移除条目，返回是否存在
    pub fn remove(&self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// 清理过期条目，返回清理数量
    pub fn evict_expired(&self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.cached_at.elapsed() < ttl);
        before.saturating_sub(self.entries.len())
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.cached_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

/// 写穿缓存的条目仓储
///
/// 所有成功返回的条目都写入缓存；`find_by_id` 优先命中缓存。
pub struct CachingItemRepository {
    inner: Arc<dyn ItemRepository>,
    cache: Arc<ObjectCache>,
}

impl CachingItemRepository {
    pub fn new(inner: Arc<dyn ItemRepository>, cache: Arc<ObjectCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<ObjectCache> {
        &self.cache
    }
}

#[async_trait]
impl ItemRepository for CachingItemRepository {
    async fn find_by_id(&self, id: &str) -> RemoteData<Item> {
        if let Some(item) = self.cache.get(id) {
            debug!("Object cache hit: {}", id);
            return RemoteData::success(item);
        }
        let rd = self.inner.find_by_id(id).await;
        if rd.has_succeeded() {
            if let Some(item) = rd.payload() {
                self.cache.put(item.clone());
            }
        }
        rd
    }

    async fn find_all_by_id(&self, ids: &[String]) -> RemoteData<Vec<Item>> {
        let rd = self.inner.find_all_by_id(ids).await;
        if rd.has_succeeded() {
            if let Some(items) = rd.payload() {
                debug!("Caching {} of {} requested items", items.len(), ids.len());
                self.cache.put_all(items.iter().cloned());
            }
        }
        rd
    }
}
