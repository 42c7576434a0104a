//! Citizen dashboard handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::Auth;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenDashboardResponse {
    pub stats: CitizenStatsDto,
    pub recent_complaints: Vec<RecentComplaintDto>,
    pub user: ProfileDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenStatsDto {
    pub total: i64,
    pub submitted: i64,
    pub in_progress: i64,
    pub resolved: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentComplaintDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: menyesha_core::ComplaintStatus,
    pub submitted_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Citizen dashboard - GET /api/dashboard/citizen
pub async fn citizen(
    State(state): State<AppState>,
    Auth(principal): Auth,
) -> Result<Json<ApiResponse<CitizenDashboardResponse>>, ApiError> {
    let citizen_id = principal.require_citizen()?;

    let dashboard = state.dashboard.citizen_dashboard(citizen_id).await?;
    let user = state.directory.profile(&citizen_id).await?;

    Ok(Json(ApiResponse::success(CitizenDashboardResponse {
        stats: CitizenStatsDto {
            total: dashboard.stats.total,
            submitted: dashboard.stats.submitted,
            in_progress: dashboard.stats.in_progress,
            resolved: dashboard.stats.resolved,
        },
        recent_complaints: dashboard
            .recent
            .iter()
            .map(|c| RecentComplaintDto {
                id: c.id,
                title: c.title.clone(),
                description: c.description.clone(),
                location: c.specific_location.clone(),
                status: c.status,
                submitted_date: c.submitted_at,
                institution: c.institution.clone(),
            })
            .collect(),
        user: ProfileDto {
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
        },
    })))
}
