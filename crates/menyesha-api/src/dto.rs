//! Wire DTOs and query-filter parsing shared across handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use menyesha_core::{Complaint, ComplaintStatus, Priority, User, UserRole, UserStatus};

use crate::error::ApiError;

/// Slim account projection returned by the auth endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
        }
    }
}

/// Directory projection: everything except the password hash and the
/// identity-document fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUserDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for DirectoryUserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            status: user.status,
            institution_name: user.institution_name.clone(),
            institution_code: user.institution_code.clone(),
            institution_category: user.institution_category.clone(),
            institution_address: user.institution_address.clone(),
            institution_description: user.institution_description.clone(),
            sector_name: user.sector_name.clone(),
            sector_code: user.sector_code.clone(),
            province: user.province.clone(),
            district: user.district.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub specific_location: String,
    pub province: String,
    pub district: String,
    pub sector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    pub category: String,
    pub status: ComplaintStatus,
    pub priority: Priority,
    pub evidence_images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<&Complaint> for ComplaintDto {
    fn from(c: &Complaint) -> Self {
        Self {
            id: c.id,
            title: c.title.clone(),
            description: c.description.clone(),
            specific_location: c.specific_location.clone(),
            province: c.province.clone(),
            district: c.district.clone(),
            sector: c.sector.clone(),
            cell: c.cell.clone(),
            village: c.village.clone(),
            institution: c.institution.clone(),
            category: c.category.clone(),
            status: c.status,
            priority: c.priority,
            evidence_images: c.evidence_images.clone(),
            citizen_id: c.citizen_id,
            anonymous_name: c.anonymous_name.clone(),
            anonymous_email: c.anonymous_email.clone(),
            anonymous_phone: c.anonymous_phone.clone(),
            assigned_to_id: c.assigned_to_id,
            submitted_at: c.submitted_at,
            resolved_at: c.resolved_at,
        }
    }
}

fn is_all_sentinel(raw: &str) -> bool {
    let normalized = raw.trim().to_lowercase();
    normalized.is_empty() || normalized == "all status" || normalized == "all priority"
}

/// Status query filter: display casing tolerated, the "All Status"
/// sentinel (and empty) means no filter, anything unrecognized is a 400.
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<ComplaintStatus>, ApiError> {
    match raw {
        None => Ok(None),
        Some(s) if is_all_sentinel(s) => Ok(None),
        Some(s) => ComplaintStatus::parse_filter(s)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request("Invalid status filter")),
    }
}

pub fn parse_priority_filter(raw: Option<&str>) -> Result<Option<Priority>, ApiError> {
    match raw {
        None => Ok(None),
        Some(s) if is_all_sentinel(s) => Ok(None),
        Some(s) => Priority::parse_filter(s)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request("Invalid priority filter")),
    }
}
