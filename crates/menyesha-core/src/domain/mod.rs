//! Domain entities for the Menyesha platform.

pub mod complaint;
pub mod principal;
pub mod user;

// Re-export all entities and enums
pub use complaint::{Complaint, ComplaintStatus, NewComplaint, Priority};
pub use principal::{ComplaintScope, Principal};
pub use user::{InstitutionProfile, SectorProfile, User, UserRole, UserStatus};
