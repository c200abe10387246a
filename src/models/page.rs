//! 分页结果

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::item::{Item, RepositoryObject};

/// 分页信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PageInfo {
    /// 每页数量
    pub elements_per_page: u32,
    /// 总条目数
    pub total_elements: u64,
    /// 总页数
    pub total_pages: u32,
    /// 当前页码（从 1 开始）
    pub current_page: u32,
}

/// 分页列表
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedList<T> {
    pub page_info: PageInfo,
    pub page: Vec<T>,
}

impl<T> Default for PaginatedList<T> {
    fn default() -> Self {
        Self {
            page_info: PageInfo::default(),
            page: Vec::new(),
        }
    }
}

impl<T> PaginatedList<T> {
    pub fn new(page_info: PageInfo, page: Vec<T>) -> Self {
        Self { page_info, page }
    }

    /// 单页列表，分页信息由条目数推出
    pub fn single_page(page: Vec<T>) -> Self {
        let len = page.len();
        Self {
            page_info: PageInfo {
                elements_per_page: len as u32,
                total_elements: len as u64,
                total_pages: if len == 0 { 0 } else { 1 },
                current_page: 1,
            },
            page,
        }
    }

    pub fn len(&self) -> usize {
        self.page.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_empty()
    }
}

/// 检索命中
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// 被索引的对象
    pub indexable_object: RepositoryObject,
    /// 高亮片段，按字段分组
    #[serde(default)]
    pub hit_highlights: BTreeMap<String, Vec<String>>,
}

impl SearchResult {
    pub fn new(indexable_object: impl Into<RepositoryObject>) -> Self {
        Self {
            indexable_object: indexable_object.into(),
            hit_highlights: BTreeMap::new(),
        }
    }
}

/// 检索结果页
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchObjects {
    pub scope: Option<String>,
    pub configuration: Option<String>,
    pub results: PaginatedList<SearchResult>,
}

/// 可被关联数据预取的结果页
pub trait ResultPage: Send + Sync {
    /// 页内可携带跟随元数据的条目；无法解包为条目的对象被忽略
    fn page_items(&self) -> Vec<&Item>;
}

impl ResultPage for PaginatedList<Item> {
    fn page_items(&self) -> Vec<&Item> {
        self.page.iter().collect()
    }
}

impl ResultPage for PaginatedList<RepositoryObject> {
    fn page_items(&self) -> Vec<&Item> {
        self.page.iter().filter_map(RepositoryObject::as_item).collect()
    }
}

impl ResultPage for SearchObjects {
    fn page_items(&self) -> Vec<&Item> {
        self.results
            .page
            .iter()
            .filter_map(|r| r.indexable_object.as_item())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::{ContainerObject, Submission};

    #[test]
    fn test_single_page_info() {
        let list = PaginatedList::single_page(vec![1, 2, 3]);
        assert_eq!(list.page_info.total_elements, 3);
        assert_eq!(list.page_info.total_pages, 1);
        assert!(PaginatedList::<i32>::single_page(vec![]).page_info.total_pages == 0);
    }

    #[test]
    fn test_search_objects_unwrap_indexable_objects() {
        let objects = SearchObjects {
            results: PaginatedList::single_page(vec![
                SearchResult::new(Item::new("u1", "One")),
                SearchResult::new(RepositoryObject::WorkspaceItem(Submission {
                    id: "ws".into(),
                    item: Some(Item::new("u2", "Two")),
                })),
                SearchResult::new(RepositoryObject::Community(ContainerObject::default())),
            ]),
            ..Default::default()
        };
        let ids: Vec<_> = objects.page_items().iter().map(|i| i.uuid.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2"]);
    }

    #[test]
    fn test_default_search_objects_is_empty() {
        let objects = SearchObjects::default();
        assert!(objects.results.is_empty());
        assert_eq!(objects.results.page_info, PageInfo::default());
        assert!(objects.page_items().is_empty());
    }
}
