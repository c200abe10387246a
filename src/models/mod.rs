//! 核心数据模型模块
//!
//! 定义仓储对象、元数据、分页结果、远程数据状态以及统计报表等结构。

pub mod item;
pub mod metadata;
pub mod options;
pub mod page;
pub mod profile;
pub mod remote_data;
pub mod statistics;

pub use item::{ContainerObject, Item, RepositoryObject, Submission};
pub use metadata::{MetadataMap, MetadataValue};
pub use options::{
    BrowseEntrySearchOptions, PaginatedSearchOptions, PaginationOptions, SearchFilter,
    SortDirection, SortOptions,
};
pub use page::{PageInfo, PaginatedList, ResultPage, SearchObjects, SearchResult};
pub use profile::ResearcherProfile;
pub use remote_data::{RemoteData, RequestState};
pub use statistics::{Point, ReportType, UsageReport};
