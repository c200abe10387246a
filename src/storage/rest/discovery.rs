//! Browse and discovery endpoints

use async_trait::async_trait;

use super::hal::{HalList, HalSearchResponse};
use super::{RestClient, segment};
use crate::models::{
    BrowseEntrySearchOptions, Item, PaginatedList, PaginatedSearchOptions, RemoteData,
    SearchObjects,
};
use crate::storage::repository::{BrowseRepository, SearchRepository};

/// `discover/browses` backed [`BrowseRepository`]
#[derive(Clone, Debug)]
pub struct RestBrowseRepository {
    client: RestClient,
}

impl RestBrowseRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    async fn browse_items(
        &self,
        filter: (&str, &str),
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>> {
        let path = format!(
            "discover/browses/{}/items",
            segment(&options.metadata_definition)
        );
        let mut params = vec![(filter.0.to_string(), filter.1.to_string())];
        params.extend(options.to_query_params());

        let rd: RemoteData<HalList> = self.client.get(&path, &params).await;
        rd.try_map(|list| list.into_paginated("items"))
    }
}

#[async_trait]
impl BrowseRepository for RestBrowseRepository {
    async fn get_browse_items_for(
        &self,
        filter_value: &str,
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>> {
        self.browse_items(("filterValue", filter_value), options).await
    }

    async fn get_browse_items_for_authority(
        &self,
        filter_authority: &str,
        options: &BrowseEntrySearchOptions,
    ) -> RemoteData<PaginatedList<Item>> {
        self.browse_items(("filterAuthority", filter_authority), options)
            .await
    }
}

/// `discover/search/objects` backed [`SearchRepository`]
#[derive(Clone, Debug)]
pub struct RestSearchRepository {
    client: RestClient,
}

impl RestSearchRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchRepository for RestSearchRepository {
    async fn search(&self, options: &PaginatedSearchOptions) -> RemoteData<SearchObjects> {
        let params = options.to_query_params();
        let rd: RemoteData<HalSearchResponse> =
            self.client.get("discover/search/objects", &params).await;
        rd.try_map(HalSearchResponse::into_search_objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaginationOptions, ResultPage};
    use crate::storage::rest::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_browse_by_authority() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/discover/browses/author/items"))
            .and(query_param("filterAuthority", "person-1"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": {"items": [{"type": "item", "uuid": "p1", "name": "Paper"}]},
                "page": {"size": 10, "totalElements": 1, "totalPages": 1, "number": 0}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repo = RestBrowseRepository::new(client_for(&server));
        let options = BrowseEntrySearchOptions::new("author", PaginationOptions::default());
        let rd = repo.get_browse_items_for_authority("person-1", &options).await;
        let page = rd.payload.unwrap();
        assert_eq!(page.page_info.current_page, 1);
        assert_eq!(page.page_items()[0].uuid, "p1");
    }

    #[tokio::test]
    async fn test_browse_by_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/discover/browses/subject/items"))
            .and(query_param("filterValue", "Rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_embedded": {"items": []}})))
            .mount(&server)
            .await;

        let repo = RestBrowseRepository::new(client_for(&server));
        let options = BrowseEntrySearchOptions::new("subject", PaginationOptions::default());
        let rd = repo.get_browse_items_for("Rust", &options).await;
        assert!(rd.is_success());
        assert!(rd.payload.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_sends_configuration() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/discover/search/objects"))
            .and(query_param("configuration", "workspace"))
            .and(query_param("query", "rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "configuration": "workspace",
                "_embedded": {"searchResult": {"_embedded": {"objects": [
                    {"_embedded": {"indexableObject": {"type": "item", "uuid": "i1", "name": "Rust"}}}
                ]}}}
            })))
            .mount(&server)
            .await;

        let repo = RestSearchRepository::new(client_for(&server));
        let options = PaginatedSearchOptions {
            configuration: Some("workspace".into()),
            query: Some("rust".into()),
            ..Default::default()
        };
        let rd = repo.search(&options).await;
        let objects = rd.payload.unwrap();
        assert_eq!(objects.page_items().len(), 1);
    }

    #[tokio::test]
    async fn test_search_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/discover/search/objects"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let repo = RestSearchRepository::new(client_for(&server));
        let rd = repo.search(&PaginatedSearchOptions::default()).await;
        assert!(rd.has_failed());
        assert_eq!(rd.status_code, Some(503));
    }
}
