//! 仓储对象显示名称

use crate::models::RepositoryObject;
use crate::models::item::ENTITY_TYPE_FIELD;

pub const UNTITLED_KEY: &str = "dso.name.untitled";

/// 按实体类型计算显示名称
#[derive(Debug, Clone, Copy, Default)]
pub struct DsoNameService;

impl DsoNameService {
    pub fn new() -> Self {
        Self
    }

    pub fn get_name(&self, object: &RepositoryObject) -> String {
        let Some(metadata) = object.metadata() else {
            return object
                .name()
                .filter(|n| !n.is_empty())
                .map(String::from)
                .unwrap_or_else(|| UNTITLED_KEY.to_string());
        };

        let by_type = match metadata.first_value(ENTITY_TYPE_FIELD) {
            Some("Person") => {
                let family = metadata.first_value("person.familyName").unwrap_or("");
                let given = metadata.first_value("person.givenName").unwrap_or("");
                match (family.is_empty(), given.is_empty()) {
                    (false, false) => Some(format!("{}, {}", family, given)),
                    (false, true) => Some(family.to_string()),
                    (true, false) => Some(given.to_string()),
                    (true, true) => None,
                }
            }
            Some("OrgUnit") => metadata
                .first_value("organization.legalName")
                .map(String::from),
            _ => None,
        };

        by_type
            .or_else(|| metadata.first_value("dc.title").map(String::from))
            .or_else(|| object.name().map(String::from))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNTITLED_KEY.to_string())
    }
}
