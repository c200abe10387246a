//! 研究者档案模型

use serde::{Deserialize, Serialize};

/// 研究者档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResearcherProfile {
    /// 档案 ID，与所属用户 ID 相同
    pub id: String,
    /// 是否公开
    pub visible: bool,
    /// 档案对应的条目
    pub item_id: Option<String>,
}

impl ResearcherProfile {
    pub fn new(id: &str, item_id: &str) -> Self {
        Self {
            id: id.to_string(),
            visible: true,
            item_id: Some(item_id.to_string()),
        }
    }
}
