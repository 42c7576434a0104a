//! Request authentication extractors
//!
//! One composable capability yields the [`Principal`] every handler
//! consumes; no route re-derives role logic or decodes tokens inline.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use menyesha_core::error::DomainError;
use menyesha_core::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer authentication required: a missing token is 401, an invalid one
/// too.
pub struct Auth(pub Principal);

/// Bearer authentication optional: a missing token degrades to
/// [`Principal::Anonymous`], but a present-and-invalid token is still
/// rejected — bad tokens never silently become anonymous.
pub struct MaybeAuth(pub Principal);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or(DomainError::Unauthenticated)?
            .to_string();
        let principal = state.auth.authenticate(&token).await?;
        Ok(Auth(principal))
    }
}

impl FromRequestParts<AppState> for MaybeAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers) {
            None => Ok(MaybeAuth(Principal::Anonymous)),
            Some(token) => {
                let token = token.to_string();
                let principal = state.auth.authenticate(&token).await?;
                Ok(MaybeAuth(principal))
            }
        }
    }
}
