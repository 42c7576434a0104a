//! Super-admin handlers: admin account creation, directory reads, status
//! toggles, and platform-wide dashboard stats

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use menyesha_core::services::{CreateInstitutionAdmin, CreateSectorAdmin};
use menyesha_core::UserStatus;

use crate::dto::DirectoryUserDto;
use crate::error::ApiError;
use crate::extract::Auth;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstitutionRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Institution name is required"))]
    pub institution_name: String,
    #[validate(length(min = 1, message = "Institution code is required"))]
    pub institution_code: String,
    pub institution_category: Option<String>,
    pub institution_address: Option<String>,
    pub institution_description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectorRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Sector name is required"))]
    pub sector_name: String,
    #[validate(length(min = 1, message = "Sector code is required"))]
    pub sector_code: String,
    pub province: Option<String>,
    pub district: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub total_users: i64,
    pub total_citizens: i64,
    pub total_institution_admins: i64,
    pub total_sector_admins: i64,
    pub active_institutions: i64,
    pub active_sectors: i64,
    pub total_complaints: i64,
    pub resolved_complaints: i64,
    pub avg_resolution_time: String,
}

/// Dropdown entry for the public complaint form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionOptionDto {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivateResponse {
    pub reactivated: u64,
}

/// Create institution admin - POST /api/admin/create-institution
pub async fn create_institution(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(payload): Json<CreateInstitutionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DirectoryUserDto>>), ApiError> {
    principal.require_super_admin()?;
    validation::validate(&payload)?;

    let user = state
        .directory
        .create_institution_admin(CreateInstitutionAdmin {
            full_name: payload.full_name,
            email: payload.email,
            password: payload.password,
            phone: payload.phone,
            institution_name: payload.institution_name,
            institution_code: payload.institution_code,
            institution_category: payload.institution_category,
            institution_address: payload.institution_address,
            institution_description: payload.institution_description,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(DirectoryUserDto::from(&user))),
    ))
}

/// Create sector admin - POST /api/admin/create-sector
pub async fn create_sector(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Json(payload): Json<CreateSectorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DirectoryUserDto>>), ApiError> {
    principal.require_super_admin()?;
    validation::validate(&payload)?;

    let user = state
        .directory
        .create_sector_admin(CreateSectorAdmin {
            full_name: payload.full_name,
            email: payload.email,
            password: payload.password,
            phone: payload.phone,
            sector_name: payload.sector_name,
            sector_code: payload.sector_code,
            province: payload.province,
            district: payload.district,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(DirectoryUserDto::from(&user))),
    ))
}

/// Directory listing - GET /api/admin/institutions
pub async fn list_institutions(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<Vec<DirectoryUserDto>>>, ApiError> {
    principal.require_super_admin()?;
    let users = state.directory.list_institution_admins().await?;
    Ok(Json(ApiResponse::success(
        users.iter().map(DirectoryUserDto::from).collect(),
    )))
}

/// Directory listing - GET /api/admin/sectors
pub async fn list_sectors(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<Vec<DirectoryUserDto>>>, ApiError> {
    principal.require_super_admin()?;
    let users = state.directory.list_sector_admins().await?;
    Ok(Json(ApiResponse::success(
        users.iter().map(DirectoryUserDto::from).collect(),
    )))
}

/// Directory listing - GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<Vec<DirectoryUserDto>>>, ApiError> {
    principal.require_super_admin()?;
    let users = state.directory.list_users().await?;
    Ok(Json(ApiResponse::success(
        users.iter().map(DirectoryUserDto::from).collect(),
    )))
}

/// Platform stats - GET /api/admin/dashboard-stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<AdminStatsResponse>>, ApiError> {
    principal.require_super_admin()?;

    let stats = state.dashboard.admin_stats().await?;

    Ok(Json(ApiResponse::success(AdminStatsResponse {
        total_users: stats.total_users,
        total_citizens: stats.total_citizens,
        total_institution_admins: stats.total_institution_admins,
        total_sector_admins: stats.total_sector_admins,
        active_institutions: stats.active_institutions,
        active_sectors: stats.active_sectors,
        total_complaints: stats.total_complaints,
        resolved_complaints: stats.resolved_complaints,
        avg_resolution_time: stats.avg_resolution_time,
    })))
}

/// Active institutions for the complaint form - GET /api/admin/all-institutions
///
/// Public: the submission form is reachable without an account.
pub async fn all_institutions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<InstitutionOptionDto>>>, ApiError> {
    let institutions = state.directory.active_institutions().await?;

    Ok(Json(ApiResponse::success(
        institutions
            .into_iter()
            .map(|user| InstitutionOptionDto {
                id: user.id,
                name: user.institution_name.unwrap_or_default(),
                code: user.institution_code.unwrap_or_default(),
                category: user
                    .institution_category
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| "General".to_string()),
            })
            .collect(),
    )))
}

/// Status toggle - PUT /api/admin/users/{id}/status and
/// PUT /api/admin/institutions/{id}/status (same semantics, both routes
/// address a user row).
pub async fn set_user_status(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<DirectoryUserDto>>, ApiError> {
    principal.require_super_admin()?;

    let status = UserStatus::from_str(&payload.status)
        .ok_or_else(|| ApiError::bad_request("Invalid status value"))?;

    let user = state.directory.set_user_status(&id, status).await?;

    Ok(Json(ApiResponse::success(DirectoryUserDto::from(&user))))
}

/// Bulk reactivation - PUT /api/admin/reactivate-all-institution-admins
pub async fn reactivate_institution_admins(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<ReactivateResponse>>, ApiError> {
    principal.require_super_admin()?;

    let reactivated = state.directory.reactivate_institution_admins().await?;

    Ok(Json(ApiResponse::success(ReactivateResponse {
        reactivated,
    })))
}
