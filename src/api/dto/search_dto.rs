//! 检索 DTO

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{
    PageInfo, PaginatedSearchOptions, PaginationOptions, RepositoryObject, SearchObjects,
    SortOptions,
};

/// 检索查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQueryParams {
    pub query: Option<String>,
    /// 检索配置，例如 `workspace`
    pub configuration: Option<String>,
    pub scope: Option<String>,
    pub dso_type: Option<String>,
    /// 页码（从 1 开始）
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl SearchQueryParams {
    pub fn to_options(&self, default_page_size: u32) -> PaginatedSearchOptions {
        PaginatedSearchOptions {
            configuration: self.configuration.clone(),
            scope: self.scope.clone(),
            query: self.query.clone(),
            dso_types: self.dso_type.iter().cloned().collect(),
            filters: Vec::new(),
            pagination: PaginationOptions::new(
                self.page.unwrap_or(1).max(1),
                self.size.unwrap_or(default_page_size).max(1),
            ),
            sort: self.sort.as_deref().and_then(SortOptions::parse),
        }
    }
}

/// 检索命中项
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub object: RepositoryObject,
    pub hit_highlights: BTreeMap<String, Vec<String>>,
}

/// 检索响应
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub scope: Option<String>,
    pub configuration: Option<String>,
    pub page: PageInfo,
    pub results: Vec<SearchHit>,
}

impl From<SearchObjects> for SearchResponse {
    fn from(objects: SearchObjects) -> Self {
        Self {
            scope: objects.scope,
            configuration: objects.configuration,
            page: objects.results.page_info,
            results: objects
                .results
                .page
                .into_iter()
                .map(|r| SearchHit {
                    object: r.indexable_object,
                    hit_highlights: r.hit_highlights,
                })
                .collect(),
        }
    }
}
