//! Dashboard aggregators: read-only projections over the complaint store

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveTime, Utc};
use uuid::Uuid;

use menyesha_shared::constants::RECENT_COMPLAINTS_LIMIT;

use crate::domain::{Complaint, ComplaintScope, ComplaintStatus, UserRole, UserStatus};
use crate::error::DomainError;
use crate::repositories::{ComplaintRepository, UserListFilter, UserRepository};

#[derive(Debug, Clone)]
pub struct StatusCounts {
    pub total: i64,
    pub submitted: i64,
    pub in_progress: i64,
    pub resolved: i64,
}

#[derive(Debug, Clone)]
pub struct CitizenDashboard {
    pub stats: StatusCounts,
    pub recent: Vec<Complaint>,
}

#[derive(Debug, Clone)]
pub struct InstitutionStats {
    pub total_complaints: i64,
    pub resolved: i64,
    pub in_progress: i64,
    pub avg_resolution_time: String,
}

#[derive(Debug, Clone)]
pub struct SectorStats {
    pub total_complaints: i64,
    pub new_complaints: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub avg_resolution_time: String,
}

#[derive(Debug, Clone)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_citizens: i64,
    pub total_institution_admins: i64,
    pub total_sector_admins: i64,
    pub active_institutions: i64,
    pub active_sectors: i64,
    pub total_complaints: i64,
    pub resolved_complaints: i64,
    pub avg_resolution_time: String,
}

pub struct DashboardService {
    complaint_repo: Arc<dyn ComplaintRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl DashboardService {
    pub fn new(
        complaint_repo: Arc<dyn ComplaintRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            complaint_repo,
            user_repo,
        }
    }

    pub async fn citizen_dashboard(
        &self,
        citizen_id: Uuid,
    ) -> Result<CitizenDashboard, DomainError> {
        let scope = ComplaintScope::CitizenOwned(citizen_id);
        let stats = self.status_counts(&scope).await?;
        let recent = self
            .complaint_repo
            .recent(&scope, RECENT_COMPLAINTS_LIMIT)
            .await?;
        Ok(CitizenDashboard { stats, recent })
    }

    pub async fn institution_stats(
        &self,
        institution_name: &str,
    ) -> Result<InstitutionStats, DomainError> {
        let scope = ComplaintScope::Institution(institution_name.to_string());
        Ok(InstitutionStats {
            total_complaints: self.complaint_repo.count(&scope, None).await?,
            resolved: self
                .complaint_repo
                .count(&scope, Some(ComplaintStatus::Resolved))
                .await?,
            in_progress: self
                .complaint_repo
                .count(&scope, Some(ComplaintStatus::InProgress))
                .await?,
            avg_resolution_time: self.avg_resolution_time(&scope).await?,
        })
    }

    pub async fn sector_stats(&self, sector_name: &str) -> Result<SectorStats, DomainError> {
        let scope = ComplaintScope::Sector(sector_name.to_string());
        Ok(SectorStats {
            total_complaints: self.complaint_repo.count(&scope, None).await?,
            new_complaints: self
                .complaint_repo
                .count_since(&scope, start_of_today())
                .await?,
            in_progress: self
                .complaint_repo
                .count(&scope, Some(ComplaintStatus::InProgress))
                .await?,
            resolved: self
                .complaint_repo
                .count(&scope, Some(ComplaintStatus::Resolved))
                .await?,
            avg_resolution_time: self.avg_resolution_time(&scope).await?,
        })
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, DomainError> {
        let role_count = |role| UserListFilter {
            role: Some(role),
            status: None,
        };
        let active_count = |role| UserListFilter {
            role: Some(role),
            status: Some(UserStatus::Active),
        };

        Ok(AdminStats {
            total_users: self.user_repo.count(&UserListFilter::default()).await?,
            total_citizens: self.user_repo.count(&role_count(UserRole::Citizen)).await?,
            total_institution_admins: self
                .user_repo
                .count(&role_count(UserRole::InstitutionAdmin))
                .await?,
            total_sector_admins: self
                .user_repo
                .count(&role_count(UserRole::SectorAdmin))
                .await?,
            active_institutions: self
                .user_repo
                .count(&active_count(UserRole::InstitutionAdmin))
                .await?,
            active_sectors: self
                .user_repo
                .count(&active_count(UserRole::SectorAdmin))
                .await?,
            total_complaints: self.complaint_repo.count(&ComplaintScope::All, None).await?,
            resolved_complaints: self
                .complaint_repo
                .count(&ComplaintScope::All, Some(ComplaintStatus::Resolved))
                .await?,
            avg_resolution_time: self.avg_resolution_time(&ComplaintScope::All).await?,
        })
    }

    async fn status_counts(&self, scope: &ComplaintScope) -> Result<StatusCounts, DomainError> {
        Ok(StatusCounts {
            total: self.complaint_repo.count(scope, None).await?,
            submitted: self
                .complaint_repo
                .count(scope, Some(ComplaintStatus::Submitted))
                .await?,
            in_progress: self
                .complaint_repo
                .count(scope, Some(ComplaintStatus::InProgress))
                .await?,
            resolved: self
                .complaint_repo
                .count(scope, Some(ComplaintStatus::Resolved))
                .await?,
        })
    }

    async fn avg_resolution_time(&self, scope: &ComplaintScope) -> Result<String, DomainError> {
        let pairs = self.complaint_repo.resolution_pairs(scope).await?;
        Ok(format_avg_resolution(&pairs))
    }
}

/// Mean of (resolved_at - submitted_at) in days, one decimal place.
/// An empty resolved set reports "0 days" rather than dividing by zero.
fn format_avg_resolution(pairs: &[(DateTime<Utc>, DateTime<Utc>)]) -> String {
    if pairs.is_empty() {
        return "0 days".to_string();
    }
    let total_days: f64 = pairs
        .iter()
        .map(|(submitted, resolved)| (*resolved - *submitted).num_seconds() as f64 / 86_400.0)
        .sum();
    format!("{:.1} days", total_days / pairs.len() as f64)
}

/// Start of the current calendar day in server-local time.
fn start_of_today() -> DateTime<Utc> {
    Local::now()
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn empty_resolved_set_reports_zero_days() {
        assert_eq!(format_avg_resolution(&[]), "0 days");
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let base = Utc::now();
        let pairs = vec![
            (base, base + Duration::days(2)),
            (base, base + Duration::days(3)),
        ];
        assert_eq!(format_avg_resolution(&pairs), "2.5 days");
    }

    #[test]
    fn sub_day_resolutions_average_fractionally() {
        let base = Utc::now();
        let pairs = vec![(base, base + Duration::hours(12))];
        assert_eq!(format_avg_resolution(&pairs), "0.5 days");
    }

    #[test]
    fn start_of_today_is_not_in_the_future() {
        assert!(start_of_today() <= Utc::now());
    }
}
