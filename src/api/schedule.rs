//! Read-only schedule viewer endpoints.

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::ScheduleView;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub quarter: String,
    #[serde(default)]
    pub month: Option<String>,
}

/// GET /api/schedule/quarters - Quarter ids available in the book.
pub async fn list_quarters(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    success(state.schedule.quarter_ids())
}

/// GET /api/schedule?quarter=Q3-2025&month=July - One month's schedule slice.
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<ScheduleView> {
    match state.schedule.view(&query.quarter, query.month.as_deref()) {
        Some(view) => success(view),
        None => Err(AppError::NotFound(format!(
            "Quarter {} not found",
            query.quarter
        ))),
    }
}
