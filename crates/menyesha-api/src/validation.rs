//! Request DTO validation
//!
//! DTOs declare their constraints with `validator` derive; the first
//! field-level message is surfaced as the 400 response body.

use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

pub fn validate<T: Validate>(value: &T) -> Result<(), ApiError> {
    value.validate().map_err(|errors| first_message(&errors))
}

fn first_message(errors: &ValidationErrors) -> ApiError {
    for (field, field_errors) in errors.field_errors() {
        if let Some(error) = field_errors.first() {
            let message = error
                .message
                .clone()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            return ApiError::bad_request(message);
        }
    }
    ApiError::bad_request("Invalid request")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Full name is required"))]
        full_name: String,
        #[validate(email(message = "Valid email is required"))]
        email: String,
    }

    #[test]
    fn valid_input_passes() {
        let probe = Probe {
            full_name: "Alice".into(),
            email: "a@x.com".into(),
        };
        assert!(validate(&probe).is_ok());
    }

    #[test]
    fn first_field_message_is_surfaced_as_400() {
        let probe = Probe {
            full_name: "Alice".into(),
            email: "not-an-email".into(),
        };
        let err = validate(&probe).unwrap_err();
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert!(err.0.to_string().contains("Valid email is required"));
    }
}
