//! Item and generic object endpoints

use async_trait::async_trait;
use serde_json::Value;

use super::hal::{HalList, normalize_object};
use super::{RestClient, segment};
use crate::models::{Item, RemoteData, RepositoryObject};
use crate::storage::repository::{ItemRepository, ObjectRepository};

const ITEMS_ENDPOINT: &str = "core/items";

/// `core/items` backed [`ItemRepository`]
#[derive(Clone, Debug)]
pub struct RestItemRepository {
    client: RestClient,
}

impl RestItemRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ItemRepository for RestItemRepository {
    async fn find_by_id(&self, id: &str) -> RemoteData<Item> {
        let path = format!("{}/{}", ITEMS_ENDPOINT, segment(id));
        self.client.get(&path, &[]).await
    }

    async fn find_all_by_id(&self, ids: &[String]) -> RemoteData<Vec<Item>> {
        let mut params: Vec<(String, String)> =
            ids.iter().map(|id| ("id".to_string(), id.clone())).collect();
        params.push(("size".into(), ids.len().max(1).to_string()));

        let path = format!("{}/search/findAllById", ITEMS_ENDPOINT);
        let rd: RemoteData<HalList> = self.client.get(&path, &params).await;
        rd.try_map(|list| list.into_paginated::<Item>("items").map(|page| page.page))
    }
}

/// `dso/find` backed [`ObjectRepository`]
#[derive(Clone, Debug)]
pub struct RestObjectRepository {
    client: RestClient,
}

impl RestObjectRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectRepository for RestObjectRepository {
    async fn find_by_id(&self, id: &str) -> RemoteData<RepositoryObject> {
        let params = vec![("uuid".to_string(), id.to_string())];
        let rd: RemoteData<Value> = self.client.get("dso/find", &params).await;
        rd.try_map(|raw| serde_json::from_value(normalize_object(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::rest::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_find_all_by_id_sends_every_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/core/items/search/findAllById"))
            .and(query_param("id", "a1"))
            .and(query_param("id", "a2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": {"items": [
                    {"type": "item", "uuid": "a2", "name": "Second"},
                    {"type": "item", "uuid": "a1", "name": "First"}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repo = RestItemRepository::new(client_for(&server));
        let rd = repo
            .find_all_by_id(&["a1".to_string(), "a2".to_string()])
            .await;
        assert!(rd.is_success());
        let mut ids: Vec<_> = rd.payload.unwrap().into_iter().map(|i| i.uuid).collect();
        ids.sort();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn test_find_all_by_id_failure_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/core/items/search/findAllById"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let repo = RestItemRepository::new(client_for(&server));
        let rd = repo.find_all_by_id(&["a1".to_string()]).await;
        assert!(rd.has_failed());
        assert_eq!(rd.status_code, Some(500));
        assert_eq!(rd.error_message.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_find_object_unwraps_embedded_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dso/find"))
            .and(query_param("uuid", "c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "collection", "uuid": "c1", "name": "Theses"
            })))
            .mount(&server)
            .await;

        let repo = RestObjectRepository::new(client_for(&server));
        let rd = repo.find_by_id("c1").await;
        assert_eq!(rd.payload.and_then(|o| o.name().map(String::from)), Some("Theses".into()));
    }
}
