//! Institution admin handlers: profile, dashboard stats, scoped complaints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::dto::{parse_priority_filter, parse_status_filter, ComplaintDto, DirectoryUserDto};
use crate::error::ApiError;
use crate::extract::Auth;
use crate::handlers::complaints::ListQuery;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionStatsResponse {
    pub total_complaints: i64,
    pub resolved: i64,
    pub in_progress: i64,
    pub avg_resolution_time: String,
    pub institution_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_code: Option<String>,
}

/// Profile - GET /api/institution/profile
pub async fn profile(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<DirectoryUserDto>>, ApiError> {
    let (id, _) = principal.require_institution_admin()?;
    let user = state.directory.profile(&id).await?;
    Ok(Json(ApiResponse::success(DirectoryUserDto::from(&user))))
}

/// Dashboard stats - GET /api/institution/dashboard-stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<InstitutionStatsResponse>>, ApiError> {
    let (id, institution_name) = principal.require_institution_admin()?;

    let stats = state.dashboard.institution_stats(institution_name).await?;
    let user = state.directory.profile(&id).await?;

    Ok(Json(ApiResponse::success(InstitutionStatsResponse {
        total_complaints: stats.total_complaints,
        resolved: stats.resolved,
        in_progress: stats.in_progress,
        avg_resolution_time: stats.avg_resolution_time,
        institution_name: institution_name.to_string(),
        institution_code: user.institution_code,
    })))
}

/// Scoped listing - GET /api/institution/complaints
pub async fn complaints(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintDto>>>, ApiError> {
    principal.require_institution_admin()?;

    let status = parse_status_filter(query.status.as_deref())?;
    let priority = parse_priority_filter(query.priority.as_deref())?;

    let complaints = state.complaints.list(&principal, status, priority).await?;

    Ok(Json(ApiResponse::success(
        complaints.iter().map(ComplaintDto::from).collect(),
    )))
}
