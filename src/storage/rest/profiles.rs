//! Researcher profile endpoints

use async_trait::async_trait;
use serde_json::json;

use super::{RestClient, segment};
use crate::models::{RemoteData, ResearcherProfile};
use crate::storage::repository::ResearcherProfileRepository;

const PROFILES_ENDPOINT: &str = "eperson/profiles";

#[derive(Clone, Debug)]
pub struct RestProfileRepository {
    client: RestClient,
}

impl RestProfileRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResearcherProfileRepository for RestProfileRepository {
    async fn find_by_id(&self, id: &str) -> RemoteData<ResearcherProfile> {
        let path = format!("{}/{}", PROFILES_ENDPOINT, segment(id));
        self.client.get(&path, &[]).await
    }

    async fn unlink_orcid(&self, profile_id: &str) -> RemoteData<ResearcherProfile> {
        let path = format!("{}/{}", PROFILES_ENDPOINT, segment(profile_id));
        let operations = json!([{"op": "remove", "path": "/orcid"}]);
        self.client.patch(&path, &operations).await
    }
}
