use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::search_dto::{SearchQueryParams, SearchResponse},
    },
    error::AppError,
};

pub async fn search_objects(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Search query: {:?}, configuration: {:?}",
        params.query, params.configuration
    );

    let options = params.to_options(state.default_page_size);
    let objects = state
        .search_manager
        .search(&options)
        .await
        .into_result("search")?;

    Ok(Json(SearchResponse::from(objects)))
}
