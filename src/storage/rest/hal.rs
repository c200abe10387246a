//! HAL envelope parsing
//!
//! The REST API wraps lists in `_embedded.<key>` with a sibling `page`
//! object, and embeds linked resources (such as a submission's item) under
//! `_embedded` as well.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{PageInfo, PaginatedList, RepositoryObject, SearchObjects, SearchResult};

/// `page` block of a HAL list
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct HalPageInfo {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    /// zero-based
    pub number: u32,
}

impl From<HalPageInfo> for PageInfo {
    fn from(page: HalPageInfo) -> Self {
        PageInfo {
            elements_per_page: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            current_page: page.number + 1,
        }
    }
}

/// A HAL list response
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HalList {
    #[serde(rename = "_embedded", default)]
    pub embedded: Map<String, Value>,
    #[serde(default)]
    pub page: Option<HalPageInfo>,
}

impl HalList {
    /// Decode the list stored under `_embedded.<key>`
    pub fn into_paginated<T: serde::de::DeserializeOwned>(
        mut self,
        key: &str,
    ) -> Result<PaginatedList<T>, serde_json::Error> {
        let raw = match self.embedded.remove(key) {
            Some(Value::Array(values)) => values,
            _ => Vec::new(),
        };
        let page = raw
            .into_iter()
            .map(|v| serde_json::from_value(normalize_object(v)))
            .collect::<Result<Vec<T>, _>>()?;
        Ok(match self.page {
            Some(info) => PaginatedList::new(info.into(), page),
            None => PaginatedList::single_page(page),
        })
    }
}

/// Lift `_embedded.item` of submissions into `item` so they decode as
/// [`RepositoryObject`] wrappers.
pub fn normalize_object(mut value: Value) -> Value {
    let embedded_item = value
        .get_mut("_embedded")
        .and_then(|e| e.as_object_mut())
        .and_then(|e| e.remove("item"));
    if let (Some(item), Some(obj)) = (embedded_item, value.as_object_mut()) {
        obj.entry("item").or_insert(item);
    }
    value
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct HalSearchHit {
    hit_highlights: std::collections::BTreeMap<String, Vec<String>>,
    #[serde(rename = "_embedded")]
    embedded: Map<String, Value>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HalSearchEmbedded {
    #[serde(rename = "searchResult")]
    search_result: HalList,
}

/// Discovery search response
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct HalSearchResponse {
    scope: Option<String>,
    configuration: Option<String>,
    #[serde(rename = "_embedded")]
    embedded: HalSearchEmbedded,
}

impl HalSearchResponse {
    pub fn into_search_objects(self) -> Result<SearchObjects, serde_json::Error> {
        let hits: PaginatedList<HalSearchHit> =
            self.embedded.search_result.into_paginated("objects")?;
        let page = hits
            .page
            .into_iter()
            .map(|mut hit| -> Result<SearchResult, serde_json::Error> {
                let object = match hit.embedded.remove("indexableObject") {
                    Some(v) => serde_json::from_value(normalize_object(v))?,
                    None => RepositoryObject::Other,
                };
                Ok(SearchResult {
                    indexable_object: object,
                    hit_highlights: hit.hit_highlights,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SearchObjects {
            scope: self.scope,
            configuration: self.configuration,
            results: PaginatedList::new(hits.page_info, page),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use serde_json::json;

    #[test]
    fn test_into_paginated_converts_page_numbers() {
        let list: HalList = serde_json::from_value(json!({
            "_embedded": {"items": [{"type": "item", "uuid": "u1", "name": "One"}]},
            "page": {"size": 20, "totalElements": 41, "totalPages": 3, "number": 1}
        }))
        .unwrap();
        let page: PaginatedList<Item> = list.into_paginated("items").unwrap();
        assert_eq!(page.page_info.current_page, 2);
        assert_eq!(page.page_info.total_elements, 41);
        assert_eq!(page.page[0].uuid, "u1");
    }

    #[test]
    fn test_missing_embedded_is_empty_page() {
        let list: HalList = serde_json::from_value(json!({})).unwrap();
        let page: PaginatedList<Item> = list.into_paginated("items").unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_search_response_unwraps_submissions() {
        let response: HalSearchResponse = serde_json::from_value(json!({
            "configuration": "workspace",
            "_embedded": {"searchResult": {
                "_embedded": {"objects": [
                    {"hitHighlights": {"dc.title": ["<em>Rust</em>"]},
                     "_embedded": {"indexableObject": {
                        "type": "workspaceitem", "id": 7,
                        "_embedded": {"item": {"uuid": "u7", "name": "Draft"}}
                     }}}
                ]},
                "page": {"size": 10, "totalElements": 1, "totalPages": 1, "number": 0}
            }}
        }))
        .unwrap();
        let objects = response.into_search_objects().unwrap();
        assert_eq!(objects.configuration.as_deref(), Some("workspace"));
        let hit = &objects.results.page[0];
        assert_eq!(hit.indexable_object.as_item().map(|i| i.uuid.as_str()), Some("u7"));
        assert_eq!(hit.hit_highlights["dc.title"], vec!["<em>Rust</em>"]);
    }
}
