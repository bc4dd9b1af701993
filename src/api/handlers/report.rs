//! Handler for the top-domains report.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde_json::json;

use crate::api::dto::report::DomainReportResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the domains with the most aliases.
///
/// # Endpoint
///
/// `GET /report/{count}`
///
/// A `count` of zero or less returns the default of five rows.
///
/// # Errors
///
/// Returns 400 with the JSON error envelope if `count` is not an integer.
pub async fn report_handler(
    count: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<DomainReportResponse>, AppError> {
    let Path(count) = count.map_err(|e| {
        AppError::bad_request("Count should be integer", json!({ "reason": e.body_text() }))
    })?;

    let items = state.reports.top_domains(count).await?;
    Ok(Json(items.into()))
}
