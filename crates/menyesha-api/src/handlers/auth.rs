//! Authentication HTTP handlers (register, login)

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use menyesha_core::services::RegisterInput;
use menyesha_infrastructure::UploadKind;

use crate::dto::UserDto;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation;

/// Register form fields (multipart, alongside the optional idCard file).
#[derive(Debug, Default, Validate)]
struct RegisterForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    full_name: String,
    #[validate(email(message = "Valid email is required"))]
    email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    password: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    phone: String,
    id_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

struct UploadedFile {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Register handler - POST /api/auth/register
///
/// Citizens only; admins are created through the super-admin endpoints.
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let mut form = RegisterForm::default();
    let mut id_card_file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "fullName" => form.full_name = read_text(field).await?,
            "email" => form.email = read_text(field).await?,
            "password" => form.password = read_text(field).await?,
            "phone" => form.phone = read_text(field).await?,
            "idType" => form.id_type = Some(read_text(field).await?),
            "idCard" => {
                let name = field.file_name().unwrap_or("id-card").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?
                    .to_vec();
                id_card_file = Some(UploadedFile {
                    name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    validation::validate(&form)?;

    let id_card = match id_card_file {
        Some(file) => Some(
            state
                .files
                .save(
                    UploadKind::IdCard,
                    &file.name,
                    file.content_type.as_deref(),
                    &file.bytes,
                )
                .await?,
        ),
        None => None,
    };

    let result = state
        .auth
        .register(RegisterInput {
            full_name: form.full_name,
            email: form.email,
            password: form.password,
            phone: form.phone,
            id_type: form.id_type,
            id_card,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AuthResponse {
            token: result.token,
            user: UserDto::from(&result.user),
        })),
    ))
}

/// Login handler - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    validation::validate(&payload)?;

    let result = state.auth.login(&payload.email, &payload.password).await?;

    Ok(Json(ApiResponse::success(AuthResponse {
        token: result.token,
        user: UserDto::from(&result.user),
    })))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid field value: {}", e)))
}
