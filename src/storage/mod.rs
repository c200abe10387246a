//! 存储层模块
//!
//! 仓储 trait、内存实现、REST 实现以及共享对象缓存。

pub mod cache;
pub mod factory;
pub mod memory;
pub mod repository;
pub mod rest;

pub use cache::{CachingItemRepository, ObjectCache};
pub use factory::{Repositories, StorageBackend, StorageFactory};
pub use memory::InMemoryRepository;
pub use repository::{
    BrowseRepository, ItemRepository, ObjectRepository, ResearcherProfileRepository,
    SearchRepository, UsageReportRepository,
};
