//! 仓储对象模型
//!
//! 检索/浏览结果中的条目可能是条目本身，也可能是包裹条目的
//! 提交记录（工作区、工作流），或者集合、社区等其他对象。

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::metadata::{MetadataMap, MetadataValue};

/// 实体类型元数据字段
pub const ENTITY_TYPE_FIELD: &str = "dspace.entity.type";

/// 条目已通过 ORCID 认证的标记字段
pub const ORCID_AUTHENTICATED_FIELD: &str = "dspace.orcid.authenticated";

/// 条目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Item {
    /// 唯一标识
    pub uuid: String,
    /// 名称
    pub name: String,
    /// Handle
    pub handle: Option<String>,
    /// 是否已归档
    #[serde(alias = "inArchive")]
    pub in_archive: bool,
    /// 是否可被发现
    pub discoverable: bool,
    /// 是否已撤回
    pub withdrawn: bool,
    /// 最后修改时间
    #[serde(alias = "lastModified")]
    pub last_modified: Option<DateTime<Utc>>,
    /// 元数据
    pub metadata: MetadataMap,
}

impl Item {
    pub fn new(uuid: &str, name: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            name: name.to_string(),
            in_archive: true,
            discoverable: true,
            ..Default::default()
        }
    }

    /// 设置实体类型
    pub fn with_entity_type(mut self, entity_type: &str) -> Self {
        self.metadata
            .add(ENTITY_TYPE_FIELD, MetadataValue::new(entity_type));
        self
    }

    /// 追加元数据
    pub fn with_metadata(mut self, key: &str, value: MetadataValue) -> Self {
        self.metadata.add(key, value);
        self
    }

    /// 实体类型标签
    pub fn entity_type(&self) -> Option<&str> {
        self.metadata
            .first_value(ENTITY_TYPE_FIELD)
            .filter(|t| !t.is_empty())
    }

    /// 匹配任一模式的全部元数据值
    pub fn all_metadata(&self, patterns: &[&str]) -> Vec<&MetadataValue> {
        self.metadata.all_values(patterns)
    }

    pub fn first_metadata(&self, pattern: &str) -> Option<&MetadataValue> {
        self.metadata.first(pattern)
    }

    pub fn first_metadata_value(&self, pattern: &str) -> Option<&str> {
        self.metadata.first_value(pattern)
    }

    pub fn has_metadata(&self, pattern: &str) -> bool {
        self.metadata.has(pattern)
    }
}

/// 工作区/工作流中的提交记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Submission {
    /// 记录 ID，后端以数字返回
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// 内嵌条目，未内嵌时为空
    pub item: Option<Item>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("invalid submission id: {other}"))),
    }
}

/// 集合、社区等容器对象
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ContainerObject {
    pub uuid: String,
    pub name: String,
    pub handle: Option<String>,
    pub metadata: MetadataMap,
}

/// 仓储对象，按 REST 返回的 `type` 字段区分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RepositoryObject {
    Item(Item),
    #[serde(rename = "workspaceitem")]
    WorkspaceItem(Submission),
    #[serde(rename = "workflowitem")]
    WorkflowItem(Submission),
    Collection(ContainerObject),
    Community(ContainerObject),
    #[serde(other)]
    Other,
}

impl RepositoryObject {
    /// 解包为条目：条目原样返回，提交记录返回其内嵌条目，其余返回 None
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            RepositoryObject::Item(item) => Some(item),
            RepositoryObject::WorkspaceItem(sub) | RepositoryObject::WorkflowItem(sub) => {
                sub.item.as_ref()
            }
            RepositoryObject::Collection(_)
            | RepositoryObject::Community(_)
            | RepositoryObject::Other => None,
        }
    }

    pub fn into_item(self) -> Option<Item> {
        match self {
            RepositoryObject::Item(item) => Some(item),
            RepositoryObject::WorkspaceItem(sub) | RepositoryObject::WorkflowItem(sub) => sub.item,
            RepositoryObject::Collection(_)
            | RepositoryObject::Community(_)
            | RepositoryObject::Other => None,
        }
    }

    /// 对象自身的 UUID（提交记录返回记录 ID）
    pub fn id(&self) -> Option<&str> {
        match self {
            RepositoryObject::Item(item) => Some(&item.uuid),
            RepositoryObject::WorkspaceItem(sub) | RepositoryObject::WorkflowItem(sub) => {
                Some(&sub.id)
            }
            RepositoryObject::Collection(c) | RepositoryObject::Community(c) => Some(&c.uuid),
            RepositoryObject::Other => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            RepositoryObject::Item(item) => Some(&item.name),
            RepositoryObject::Collection(c) | RepositoryObject::Community(c) => Some(&c.name),
            _ => self.as_item().map(|item| item.name.as_str()),
        }
    }

    pub fn metadata(&self) -> Option<&MetadataMap> {
        match self {
            RepositoryObject::Collection(c) | RepositoryObject::Community(c) => Some(&c.metadata),
            _ => self.as_item().map(|item| &item.metadata),
        }
    }
}

impl From<Item> for RepositoryObject {
    fn from(item: Item) -> Self {
        RepositoryObject::Item(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_from_metadata() {
        let item = Item::new("u1", "Paper").with_entity_type("Publication");
        assert_eq!(item.entity_type(), Some("Publication"));
        assert_eq!(Item::new("u2", "Plain").entity_type(), None);
    }

    #[test]
    fn test_unwrap_variants() {
        let item = Item::new("u1", "Paper");
        let wrapped = RepositoryObject::WorkspaceItem(Submission {
            id: "ws-1".into(),
            item: Some(item.clone()),
        });
        assert_eq!(wrapped.as_item(), Some(&item));
        assert_eq!(wrapped.id(), Some("ws-1"));

        let empty = RepositoryObject::WorkflowItem(Submission {
            id: "wf-1".into(),
            item: None,
        });
        assert!(empty.as_item().is_none());

        let collection = RepositoryObject::Collection(ContainerObject {
            uuid: "c1".into(),
            name: "Theses".into(),
            ..Default::default()
        });
        assert!(collection.as_item().is_none());
        assert_eq!(collection.name(), Some("Theses"));
        assert!(RepositoryObject::Other.into_item().is_none());
    }

    #[test]
    fn test_tagged_json() {
        let json = r#"{"type":"workflowitem","id":9,"item":{"uuid":"u9","name":"Draft"}}"#;
        let object: RepositoryObject = serde_json::from_str(json).unwrap();
        assert_eq!(object.as_item().map(|i| i.uuid.as_str()), Some("u9"));
        assert_eq!(object.id(), Some("9"));

        let json = r#"{"type":"bitstream","uuid":"b1"}"#;
        let object: RepositoryObject = serde_json::from_str(json).unwrap();
        assert_eq!(object, RepositoryObject::Other);
    }
}
