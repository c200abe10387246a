use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{
        app_state::AppState,
        dto::browse_dto::{BrowseQueryParams, ItemPageResponse},
    },
    error::AppError,
};

pub async fn browse_items(
    State(state): State<AppState>,
    Path(definition): Path<String>,
    Query(params): Query<BrowseQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let options = params.to_options(&definition, state.default_page_size);

    let rd = match (&params.filter_authority, &params.filter_value) {
        (Some(authority), _) if !authority.is_empty() => {
            debug!("Browse {} by authority {}", definition, authority);
            state
                .search_manager
                .get_browse_items_for_authority(authority, &options)
                .await
        }
        (_, Some(value)) if !value.is_empty() => {
            debug!("Browse {} by value {}", definition, value);
            state
                .search_manager
                .get_browse_items_for(value, &options)
                .await
        }
        _ => {
            return Err(AppError::Validation(
                "filter_value or filter_authority is required".to_string(),
            ));
        }
    };

    let page = rd.into_result(&format!("browse index {}", definition))?;
    Ok(Json(ItemPageResponse::from(page)))
}
