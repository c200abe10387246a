use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{api::app_state::AppState, error::AppError};

pub async fn get_report_table(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Statistics table for report: {}", report_id);

    let report = state
        .usage_report_repository
        .find_by_id(&report_id)
        .await
        .into_result(&format!("usage report {}", report_id))?;

    let table = state.statistics_service.build_table(&report).await;
    Ok(Json(table))
}
