//! REST-backed repositories
//!
//! Thin clients for the repository REST API. Every response is turned into a
//! terminal [`RemoteData`]: transport failures carry status code 0 (or 504 on
//! timeout), HTTP failures carry the response status.

pub mod discovery;
pub mod hal;
pub mod items;
pub mod profiles;
pub mod statistics;

pub use discovery::{RestBrowseRepository, RestSearchRepository};
pub use items::{RestItemRepository, RestObjectRepository};
pub use profiles::RestProfileRepository;
pub use statistics::RestUsageReportRepository;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::config::RestConfig;
use crate::error::{AppError, Result};
use crate::models::RemoteData;

const CORRELATION_HEADER: &str = "X-CORRELATION-ID";

/// Shared HTTP client for the repository REST API
#[derive(Clone, Debug)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &RestConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(AppError::Config("rest.base_url is empty".to_string()));
        }
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        if !config.user_agent.is_empty() {
            builder = builder.user_agent(config.user_agent.clone());
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with query parameters and decode the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> RemoteData<T> {
        let request = self.http.get(self.url(path)).query(params);
        self.execute(request).await
    }

    /// PATCH `path` with a JSON Patch document
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        operations: &serde_json::Value,
    ) -> RemoteData<T> {
        let request = self
            .http
            .patch(self.url(path))
            .header("Content-Type", "application/json-patch+json")
            .body(operations.to_string());
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteData<T> {
        let correlation_id = uuid::Uuid::new_v4().to_string();
        let response = match request
            .header(CORRELATION_HEADER, &correlation_id)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("REST request failed [{}]: {}", correlation_id, e);
                let status = if e.is_timeout() { 504 } else { 0 };
                return RemoteData::error(status, e.to_string());
            }
        };

        let status = response.status();
        debug!("REST {} [{}] -> {}", response.url(), correlation_id, status);

        if status == StatusCode::NO_CONTENT {
            return RemoteData::no_content(status.as_u16());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return RemoteData::error(status.as_u16(), body);
        }

        match response.json::<T>().await {
            Ok(payload) => RemoteData::success_with_status(payload, status.as_u16()),
            Err(e) => {
                warn!("Invalid REST response body [{}]: {}", correlation_id, e);
                RemoteData::error(status.as_u16(), format!("invalid response body: {}", e))
            }
        }
    }
}

/// Encode a single path segment
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use wiremock::MockServer;

    pub fn client_for(server: &MockServer) -> RestClient {
        RestClient::new(&RestConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            user_agent: "archivist-test".into(),
        })
        .expect("client")
    }
}
