use std::sync::Arc;

use menyesha_core::services::{
    AuthService, ComplaintService, DashboardService, DirectoryService,
};
use menyesha_infrastructure::DiskFileStore;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub directory: Arc<DirectoryService>,
    pub complaints: Arc<ComplaintService>,
    pub dashboard: Arc<DashboardService>,
    pub files: Arc<DiskFileStore>,
}
