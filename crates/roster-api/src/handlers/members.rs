//! Member handlers
//!
//! Manual administration of the active roster.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use roster_service::dto::{
    CreateMemberRequest, MemberDetailResponse, MemberFilter, MemberListResponse,
    MutationResponse, UpdateMemberRequest,
};
use roster_service::MemberService;

use crate::extractors::{ApiQuery, OperatorId, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List members, optionally filtered by activityStatus, role or status
///
/// GET /api/members
pub async fn list_members(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<MemberFilter>,
) -> ApiResult<Json<MemberListResponse>> {
    let members = MemberService::new(state.service_context())
        .list_members(filter)
        .await?;
    Ok(Json(MemberListResponse { members }))
}

/// GET /api/members/{member_id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> ApiResult<Json<MemberDetailResponse>> {
    let member = MemberService::new(state.service_context())
        .get_member(&member_id)
        .await?;
    Ok(Json(MemberDetailResponse { member }))
}

/// POST /api/members
pub async fn create_member(
    State(state): State<AppState>,
    OperatorId(operator): OperatorId,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<MutationResponse>>> {
    let member = MemberService::new(state.service_context())
        .create_member(request, operator, Utc::now())
        .await?;
    Ok(Created(Json(MutationResponse::created(member.id))))
}

/// PUT /api/members/{member_id}
pub async fn update_member(
    State(state): State<AppState>,
    OperatorId(operator): OperatorId,
    Path(member_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MutationResponse>> {
    MemberService::new(state.service_context())
        .update_member(&member_id, request, operator, Utc::now())
        .await?;
    Ok(Json(MutationResponse::ok()))
}

/// Withdraw a member: the row moves to the withdrawn roster
///
/// DELETE /api/members/{member_id}
pub async fn withdraw_member(
    State(state): State<AppState>,
    OperatorId(operator): OperatorId,
    Path(member_id): Path<String>,
) -> ApiResult<Json<MutationResponse>> {
    MemberService::new(state.service_context())
        .withdraw_member(&member_id, operator, Utc::now())
        .await?;
    Ok(Json(MutationResponse::ok()))
}
