//! 服务模块

pub mod name;
pub mod orcid;
pub mod routing;
pub mod search_manager;
pub mod statistics;
pub mod uri_values;

pub use name::DsoNameService;
pub use orcid::{OrcidService, UnlinkOutcome, create_orcid_service};
pub use routing::{item_edit_route, item_page_route};
pub use search_manager::SearchManager;
pub use statistics::{StatisticsRow, StatisticsTable, StatisticsTableService};
pub use uri_values::{MetadataUriValues, UriLink};
