//! Complaint HTTP handlers (submit, list, triage updates)

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use menyesha_core::{ComplaintStatus, NewComplaint, Priority};
use menyesha_infrastructure::UploadKind;
use menyesha_shared::constants::MAX_EVIDENCE_IMAGES;

use crate::dto::{parse_priority_filter, parse_status_filter, ComplaintDto};
use crate::error::ApiError;
use crate::extract::{Auth, MaybeAuth};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation;

#[derive(Debug, Default, Validate)]
struct ComplaintForm {
    title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    description: String,
    #[validate(length(min = 1, message = "Specific location is required"))]
    specific_location: String,
    #[validate(length(min = 1, message = "Province is required"))]
    province: String,
    #[validate(length(min = 1, message = "District is required"))]
    district: String,
    #[validate(length(min = 1, message = "Sector is required"))]
    sector: String,
    cell: Option<String>,
    village: Option<String>,
    institution: Option<String>,
    category: Option<String>,
    anonymous_name: Option<String>,
    anonymous_email: Option<String>,
    anonymous_phone: Option<String>,
}

struct EvidenceFile {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitComplaintResponse {
    pub id: Uuid,
    pub title: String,
    pub status: ComplaintStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriorityRequest {
    pub priority: String,
}

/// Submit handler - POST /api/complaints
///
/// Anonymous or authenticated; an authenticated caller becomes the owning
/// citizen. Evidence files are written to disk before the row insert — a
/// crash in between can orphan a file, which is accepted for this domain.
pub async fn submit(
    State(state): State<AppState>,
    MaybeAuth(principal): MaybeAuth,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmitComplaintResponse>>), ApiError> {
    let mut form = ComplaintForm::default();
    let mut files: Vec<EvidenceFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "title" => form.title = Some(read_text(field).await?),
            "description" => form.description = read_text(field).await?,
            "specificLocation" => form.specific_location = read_text(field).await?,
            "province" => form.province = read_text(field).await?,
            "district" => form.district = read_text(field).await?,
            "sector" => form.sector = read_text(field).await?,
            "cell" => form.cell = Some(read_text(field).await?),
            "village" => form.village = Some(read_text(field).await?),
            "institution" => form.institution = Some(read_text(field).await?),
            "category" => form.category = Some(read_text(field).await?),
            "anonymousName" => form.anonymous_name = Some(read_text(field).await?),
            "anonymousEmail" => form.anonymous_email = Some(read_text(field).await?),
            "anonymousPhone" => form.anonymous_phone = Some(read_text(field).await?),
            "evidenceImages" => {
                if files.len() >= MAX_EVIDENCE_IMAGES {
                    return Err(ApiError::bad_request(format!(
                        "At most {} evidence images are allowed",
                        MAX_EVIDENCE_IMAGES
                    )));
                }
                let name = field.file_name().unwrap_or("evidence").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?
                    .to_vec();
                files.push(EvidenceFile {
                    name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    validation::validate(&form)?;

    let mut evidence_images = Vec::with_capacity(files.len());
    for file in &files {
        let filename = state
            .files
            .save(
                UploadKind::Evidence,
                &file.name,
                file.content_type.as_deref(),
                &file.bytes,
            )
            .await?;
        evidence_images.push(filename);
    }

    let complaint = state
        .complaints
        .submit(
            NewComplaint {
                title: form.title,
                description: form.description,
                specific_location: form.specific_location,
                province: form.province,
                district: form.district,
                sector: form.sector,
                cell: form.cell,
                village: form.village,
                institution: form.institution,
                category: form.category,
                evidence_images,
                anonymous_name: form.anonymous_name,
                anonymous_email: form.anonymous_email,
                anonymous_phone: form.anonymous_phone,
            },
            &principal,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SubmitComplaintResponse {
            id: complaint.id,
            title: complaint.title,
            status: complaint.status,
            submitted_at: complaint.submitted_at,
        })),
    ))
}

/// Listing handler - GET /api/complaints
///
/// Role-scoped per the access policy; anonymous callers get 401.
pub async fn list(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintDto>>>, ApiError> {
    let status = parse_status_filter(query.status.as_deref())?;
    let priority = parse_priority_filter(query.priority.as_deref())?;

    let complaints = state.complaints.list(&principal, status, priority).await?;

    Ok(Json(ApiResponse::success(
        complaints.iter().map(ComplaintDto::from).collect(),
    )))
}

/// Status transition handler - PUT /api/complaints/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<ComplaintDto>>, ApiError> {
    let status = ComplaintStatus::from_str(&payload.status)
        .ok_or_else(|| ApiError::bad_request("Invalid status value"))?;

    let complaint = state
        .complaints
        .update_status(&principal, &id, status)
        .await?;

    Ok(Json(ApiResponse::success(ComplaintDto::from(&complaint))))
}

/// Priority handler - PUT /api/complaints/{id}/priority
pub async fn update_priority(
    State(state): State<AppState>,
    Auth(principal): Auth,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePriorityRequest>,
) -> Result<Json<ApiResponse<ComplaintDto>>, ApiError> {
    let priority = Priority::from_str(&payload.priority)
        .ok_or_else(|| ApiError::bad_request("Invalid priority value"))?;

    let complaint = state
        .complaints
        .update_priority(&principal, &id, priority)
        .await?;

    Ok(Json(ApiResponse::success(ComplaintDto::from(&complaint))))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid field value: {}", e)))
}
