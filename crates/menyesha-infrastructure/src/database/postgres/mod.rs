//! PostgreSQL repository implementations

pub mod complaint_repo_impl;
pub mod user_repo_impl;

pub use complaint_repo_impl::PgComplaintRepository;
pub use user_repo_impl::PgUserRepository;
