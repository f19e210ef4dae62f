//! Member API endpoints, backed by the roster store.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{MemberForm, RosterStats, TeamMember};
use crate::AppState;

/// GET /api/members - List the current roster.
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Vec<TeamMember>> {
    let roster = state.roster.read().await;
    success(roster.members().to_vec())
}

/// GET /api/members/stats - Headline team counts.
pub async fn member_stats(State(state): State<AppState>) -> ApiResult<RosterStats> {
    let roster = state.roster.read().await;
    success(roster.stats())
}

/// GET /api/members/{id} - Get a single member.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TeamMember> {
    let roster = state.roster.read().await;
    match roster.member(&id) {
        Some(member) => success(member.clone()),
        None => Err(AppError::NotFound(format!("Member {} not found", id))),
    }
}

/// POST /api/members - Add a member via the add flow.
pub async fn create_member(
    State(state): State<AppState>,
    Json(form): Json<MemberForm>,
) -> ApiResult<TeamMember> {
    let mut roster = state.roster.write().await;
    let member = roster.submit_add(form).await?;
    success(member)
}

/// PUT /api/members/{id} - Update a member via the edit flow.
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<MemberForm>,
) -> ApiResult<TeamMember> {
    let mut roster = state.roster.write().await;
    roster.open_edit(&id)?;
    let member = roster.submit_edit(form).await?;
    success(member)
}

/// DELETE /api/members/{id} - Delete a member.
pub async fn delete_member(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let mut roster = state.roster.write().await;
    roster.remove(&id).await?;
    success(())
}
