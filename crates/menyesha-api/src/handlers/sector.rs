//! Sector admin handlers: profile, dashboard stats, scoped complaints

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
pub struct SectorStatsResponse {
    pub total_complaints: i64,
    pub new_complaints: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub avg_resolution_time: String,
    pub sector_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    pub admin_name: String,
}

/// Profile - GET /api/sector/profile
pub async fn profile(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<DirectoryUserDto>>, ApiError> {
    let (id, _) = principal.require_sector_admin()?;
    let user = state.directory.profile(&id).await?;
    Ok(Json(ApiResponse::success(DirectoryUserDto::from(&user))))
}

/// Dashboard stats - GET /api/sector/dashboard-stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<SectorStatsResponse>>, ApiError> {
    let (id, sector_name) = principal.require_sector_admin()?;

    let stats = state.dashboard.sector_stats(sector_name).await?;
    let user = state.directory.profile(&id).await?;

    Ok(Json(ApiResponse::success(SectorStatsResponse {
        total_complaints: stats.total_complaints,
        new_complaints: stats.new_complaints,
        in_progress: stats.in_progress,
        resolved: stats.resolved,
        avg_resolution_time: stats.avg_resolution_time,
        sector_name: sector_name.to_string(),
        district: user.district,
        province: user.province,
        admin_name: user.full_name,
    })))
}

/// Scoped listing - GET /api/sector/complaints
pub async fn complaints(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintDto>>>, ApiError> {
    principal.require_sector_admin()?;

    let status = parse_status_filter(query.status.as_deref())?;
    let priority = parse_priority_filter(query.priority.as_deref())?;

    let complaints = state.complaints.list(&principal, status, priority).await?;

    Ok(Json(ApiResponse::success(
        complaints.iter().map(ComplaintDto::from).collect(),
    )))
}
