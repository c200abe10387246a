//! 浏览 DTO

use serde::{Deserialize, Serialize};

use crate::models::{
    BrowseEntrySearchOptions, Item, PageInfo, PaginatedList, PaginationOptions, SortOptions,
};

/// 浏览查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrowseQueryParams {
    /// 按元数据值浏览，例如作者姓名
    pub filter_value: Option<String>,
    /// 按 authority 浏览；与 `filter_value` 同时给出时优先
    pub filter_authority: Option<String>,
    /// 页码（从 1 开始）
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// `field,ASC|DESC`
    pub sort: Option<String>,
    pub scope: Option<String>,
    pub starts_with: Option<String>,
}

impl BrowseQueryParams {
    pub fn to_options(&self, definition: &str, default_page_size: u32) -> BrowseEntrySearchOptions {
        BrowseEntrySearchOptions {
            metadata_definition: definition.to_string(),
            pagination: PaginationOptions::new(
                self.page.unwrap_or(1).max(1),
                self.size.unwrap_or(default_page_size).max(1),
            ),
            sort: self.sort.as_deref().and_then(SortOptions::parse),
            starts_with: self.starts_with.clone(),
            scope: self.scope.clone(),
        }
    }
}

/// 条目分页响应
#[derive(Debug, Serialize)]
pub struct ItemPageResponse {
    pub page: PageInfo,
    pub items: Vec<Item>,
}

impl From<PaginatedList<Item>> for ItemPageResponse {
    fn from(list: PaginatedList<Item>) -> Self {
        Self {
            page: list.page_info,
            items: list.page,
        }
    }
}
