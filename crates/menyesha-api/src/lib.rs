//! # Menyesha API
//!
//! HTTP handlers, request DTOs, response envelope, and the Principal
//! extractor.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod state;
pub mod validation;

pub use error::ApiError;
pub use state::AppState;
