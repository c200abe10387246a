use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::item_dto::{LinksQueryParams, LinksResponse, OrcidStatusResponse},
    },
    error::AppError,
    models::Item,
    services::{routing::item_page_route, uri_values::MetadataUriValues},
};

async fn load_item(state: &AppState, id: &str) -> Result<Item, AppError> {
    state
        .item_repository
        .find_by_id(id)
        .await
        .into_result(&format!("item {}", id))
}

/// 只读取共享缓存，不访问后端
pub async fn get_cached_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Cache lookup for item: {}", id);
    state
        .object_cache
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Item not cached: {}", id)))
}

pub async fn get_orcid_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let item = load_item(&state, &id).await?;
    Ok(Json(OrcidStatusResponse {
        linked: state.orcid_service.is_linked_to_orcid(&item),
        item_page: item_page_route(&item),
        item_id: item.uuid,
    }))
}

pub async fn unlink_orcid(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Unlink ORCID for item: {}", id);
    let item = load_item(&state, &id).await?;
    let outcome = state.orcid_service.unlink_orcid(&item).await;

    let status = if outcome.is_success() {
        // 条目元数据已变更
        state.object_cache.remove(&item.uuid);
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Json(outcome)))
}

pub async fn get_uri_links(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LinksQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    if params.field.trim().is_empty() {
        return Err(AppError::Validation("field cannot be empty".to_string()));
    }

    let item = load_item(&state, &id).await?;
    let values = MetadataUriValues::from_item(
        &item,
        params.field.trim(),
        params.label,
        params.separator.as_deref().unwrap_or(", "),
        params.linktext,
    );

    Ok(Json(LinksResponse {
        links: values.links(),
        label: values.label,
        separator: values.separator,
    }))
}
