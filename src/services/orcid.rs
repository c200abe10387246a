//! ORCID 解绑

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::Item;
pub use crate::models::item::ORCID_AUTHENTICATED_FIELD;
use crate::services::routing::item_edit_route;
use crate::storage::repository::ResearcherProfileRepository;

/// 条目所属用户（其 authority 为档案 ID）
pub const OWNER_FIELD: &str = "dspace.object.owner";

pub const UNLINK_SUCCESS_KEY: &str = "item.edit.unlink-orcid.unlink.success";
pub const UNLINK_ERROR_KEY: &str = "item.edit.unlink-orcid.unlink.error";

/// 解绑结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum UnlinkOutcome {
    Success {
        /// 成功后跳转的编辑页面
        redirect: String,
        message_key: String,
    },
    Error {
        message_key: String,
    },
}

impl UnlinkOutcome {
    fn error() -> Self {
        UnlinkOutcome::Error {
            message_key: UNLINK_ERROR_KEY.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UnlinkOutcome::Success { .. })
    }
}

#[async_trait]
pub trait OrcidService: Send + Sync {
    fn is_linked_to_orcid(&self, item: &Item) -> bool;

    async fn unlink_orcid(&self, item: &Item) -> UnlinkOutcome;
}

pub struct OrcidServiceImpl {
    profiles: Arc<dyn ResearcherProfileRepository>,
}

impl OrcidServiceImpl {
    pub fn new(profiles: Arc<dyn ResearcherProfileRepository>) -> Self {
        Self { profiles }
    }

    fn profile_id(item: &Item) -> Option<&str> {
        item.first_metadata(OWNER_FIELD)
            .and_then(|owner| owner.authority_key())
    }
}

#[async_trait]
impl OrcidService for OrcidServiceImpl {
    fn is_linked_to_orcid(&self, item: &Item) -> bool {
        item.has_metadata(ORCID_AUTHENTICATED_FIELD)
    }

    async fn unlink_orcid(&self, item: &Item) -> UnlinkOutcome {
        let Some(profile_id) = Self::profile_id(item) else {
            warn!("Item {} has no owning profile, cannot unlink ORCID", item.uuid);
            return UnlinkOutcome::error();
        };

        let rd = self.profiles.unlink_orcid(profile_id).await;
        if rd.has_succeeded() {
            info!("Unlinked ORCID for profile {} (item {})", profile_id, item.uuid);
            UnlinkOutcome::Success {
                redirect: item_edit_route(item),
                message_key: UNLINK_SUCCESS_KEY.to_string(),
            }
        } else {
            warn!(
                "ORCID unlink failed for profile {}: {:?} {}",
                profile_id,
                rd.status_code,
                rd.error_message.as_deref().unwrap_or("")
            );
            UnlinkOutcome::error()
        }
    }
}

pub fn create_orcid_service(
    profiles: Arc<dyn ResearcherProfileRepository>,
) -> Box<dyn OrcidService> {
    Box::new(OrcidServiceImpl::new(profiles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetadataValue, ResearcherProfile};
    use crate::storage::memory::InMemoryRepository;
    use crate::storage::repository::ItemRepository;

    fn linked_person() -> Item {
        Item::new("person-item", "Smith, Jane")
            .with_entity_type("Person")
            .with_metadata(ORCID_AUTHENTICATED_FIELD, MetadataValue::new("2024-01-01"))
            .with_metadata(
                OWNER_FIELD,
                MetadataValue::with_authority("Jane Smith", "eperson-1"),
            )
    }

    fn repo_with_profile() -> Arc<InMemoryRepository> {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert_item(linked_person());
        repo.insert_profile(ResearcherProfile::new("eperson-1", "person-item"));
        repo
    }

    #[test]
    fn test_is_linked() {
        let service = OrcidServiceImpl::new(Arc::new(InMemoryRepository::new()));
        assert!(service.is_linked_to_orcid(&linked_person()));
        assert!(!service.is_linked_to_orcid(&Item::new("x", "X")));
    }

    #[tokio::test]
    async fn test_unlink_success_redirects_to_edit_page() {
        let repo = repo_with_profile();
        let service = create_orcid_service(repo.clone());

        let outcome = service.unlink_orcid(&linked_person()).await;
        assert_eq!(
            outcome,
            UnlinkOutcome::Success {
                redirect: "/entities/person/person-item/edit".into(),
                message_key: UNLINK_SUCCESS_KEY.into(),
            }
        );

        let item = ItemRepository::find_by_id(repo.as_ref(), "person-item")
            .await
            .payload
            .unwrap();
        assert!(!service.is_linked_to_orcid(&item));
    }

    #[tokio::test]
    async fn test_unlink_without_owner_fails() {
        let service = OrcidServiceImpl::new(repo_with_profile());
        let item = Item::new("orphan", "Orphan")
            .with_metadata(ORCID_AUTHENTICATED_FIELD, MetadataValue::new("yes"));
        assert_eq!(service.unlink_orcid(&item).await, UnlinkOutcome::error());
    }

    #[tokio::test]
    async fn test_unlink_unknown_profile_fails() {
        let service = OrcidServiceImpl::new(Arc::new(InMemoryRepository::new()));
        let outcome = service.unlink_orcid(&linked_person()).await;
        assert!(!outcome.is_success());
    }
}
