//! Domain services (business logic)

pub mod auth_service;
pub mod complaint_service;
pub mod dashboard_service;
pub mod directory_service;

pub use auth_service::{AuthService, AuthSuccess, RegisterInput};
pub use complaint_service::ComplaintService;
pub use dashboard_service::{
    AdminStats, CitizenDashboard, DashboardService, InstitutionStats, SectorStats, StatusCounts,
};
pub use directory_service::{CreateInstitutionAdmin, CreateSectorAdmin, DirectoryService};
