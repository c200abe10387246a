//! 条目 DTO

use serde::{Deserialize, Serialize};

use crate::services::uri_values::UriLink;

/// ORCID 关联状态
#[derive(Debug, Serialize)]
pub struct OrcidStatusResponse {
    pub item_id: String,
    pub linked: bool,
    /// 条目页面路径
    pub item_page: String,
}

/// URI 链接查询参数
#[derive(Debug, Deserialize)]
pub struct LinksQueryParams {
    /// 元数据字段，支持 `*` 通配
    pub field: String,
    pub label: Option<String>,
    pub linktext: Option<String>,
    pub separator: Option<String>,
}

/// URI 链接响应
#[derive(Debug, Serialize)]
pub struct LinksResponse {
    pub label: Option<String>,
    pub separator: String,
    pub links: Vec<UriLink>,
}
