//! 仓储 trait
//!
//! 每个方法返回一个终态的 [`RemoteData`]：成功带载荷，或失败带状态码。

use async_trait::async_trait;

use crate::models::{
    BrowseEntrySearchOptions, Item, PaginatedList, PaginatedSearchOptions, RemoteData,
    RepositoryObject, ResearcherProfile, SearchObjects, UsageReport,
};

/// 条目仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// 根据 UUID 获取条目
    async fn find_by_id(&self, id: &str) -> RemoteData<Item>;

    /// 批量获取条目
    ///
    /// `ids` 不能为空；返回顺序不保证与输入一致，未找到的 ID 不出现在结果中。
    async fn find_all_by_id(&self, ids: &[String]) -> RemoteData<Vec<Item>>;
}

/// 浏览仓储
#[async_trait]
pub trait BrowseRepository: Send + Sync {
    /// 浏览与某个元数据值关联的条目（例如作者姓名）
    async fn get_browse_items_for(
        &self,
        filter_value: &str,
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>>;

    /// 浏览与某个 authority 关联的条目
    async fn get_browse_items_for_authority(
        &self,
        filter_authority: &str,
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>>;
}

/// 检索仓储
#[async_trait]
pub trait SearchRepository: Send + Sync {
    async fn search(&self, options: &PaginatedSearchOptions) -> RemoteData<SearchObjects>;
}

/// 任意仓储对象
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RemoteData<RepositoryObject>;
}

/// 研究者档案仓储
#[async_trait]
pub trait ResearcherProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RemoteData<ResearcherProfile>;

    /// 解除档案与 ORCID 的关联
    async fn unlink_orcid(&self, profile_id: &str) -> RemoteData<ResearcherProfile>;
}

/// 使用统计报表仓储
#[async_trait]
pub trait UsageReportRepository: Send + Sync {
    async fn find_by_id(&self, report_id: &str) -> RemoteData<UsageReport>;
}
