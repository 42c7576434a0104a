//! In-memory repository fakes shared by the service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use menyesha_core::error::DomainError;
use menyesha_core::repositories::{
    ComplaintFilter, ComplaintRepository, UserListFilter, UserRepository,
};
use menyesha_core::{Complaint, ComplaintStatus, User, UserRole, UserStatus};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == *id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_admin_by_code(
        &self,
        role: UserRole,
        code: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| {
                u.role == role
                    && match role {
                        UserRole::InstitutionAdmin => u.institution_code.as_deref() == Some(code),
                        UserRole::SectorAdmin => u.sector_code.as_deref() == Some(code),
                        _ => false,
                    }
            })
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(user.clone())
    }

    async fn set_status(
        &self,
        id: &Uuid,
        status: UserStatus,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == *id) {
            Some(user) => {
                user.status = status;
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn set_status_for_role(
        &self,
        role: UserRole,
        from: UserStatus,
        to: UserStatus,
    ) -> Result<u64, DomainError> {
        let mut users = self.users.lock().unwrap();
        let mut count = 0;
        for user in users.iter_mut() {
            if user.role == role && user.status == from {
                user.status = to;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn list(&self, filter: &UserListFilter) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| filter.role.map_or(true, |r| u.role == r))
            .filter(|u| filter.status.map_or(true, |s| u.status == s))
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn count(&self, filter: &UserListFilter) -> Result<i64, DomainError> {
        Ok(self.list(filter).await?.len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryComplaintRepository {
    complaints: Mutex<Vec<Complaint>>,
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn create(&self, complaint: &Complaint) -> Result<Complaint, DomainError> {
        self.complaints.lock().unwrap().push(complaint.clone());
        Ok(complaint.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Complaint>, DomainError> {
        Ok(self
            .complaints
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn update(&self, complaint: &Complaint) -> Result<Complaint, DomainError> {
        let mut complaints = self.complaints.lock().unwrap();
        match complaints.iter_mut().find(|c| c.id == complaint.id) {
            Some(existing) => {
                *existing = complaint.clone();
                Ok(complaint.clone())
            }
            None => Err(DomainError::NotFound("Complaint not found".into())),
        }
    }

    async fn list(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, DomainError> {
        let mut complaints: Vec<Complaint> = self
            .complaints
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filter.scope.permits(c))
            .filter(|c| filter.status.map_or(true, |s| c.status == s))
            .filter(|c| filter.priority.map_or(true, |p| c.priority == p))
            .cloned()
            .collect();
        complaints.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(complaints)
    }

    async fn recent(
        &self,
        scope: &menyesha_core::ComplaintScope,
        limit: i64,
    ) -> Result<Vec<Complaint>, DomainError> {
        let mut complaints = self
            .list(&ComplaintFilter::scope_only(scope.clone()))
            .await?;
        complaints.truncate(limit as usize);
        Ok(complaints)
    }

    async fn count(
        &self,
        scope: &menyesha_core::ComplaintScope,
        status: Option<ComplaintStatus>,
    ) -> Result<i64, DomainError> {
        Ok(self
            .complaints
            .lock()
            .unwrap()
            .iter()
            .filter(|c| scope.permits(c))
            .filter(|c| status.map_or(true, |s| c.status == s))
            .count() as i64)
    }

    async fn count_since(
        &self,
        scope: &menyesha_core::ComplaintScope,
        since: DateTime<Utc>,
    ) -> Result<i64, DomainError> {
        Ok(self
            .complaints
            .lock()
            .unwrap()
            .iter()
            .filter(|c| scope.permits(c) && c.submitted_at >= since)
            .count() as i64)
    }

    async fn resolution_pairs(
        &self,
        scope: &menyesha_core::ComplaintScope,
    ) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>, DomainError> {
        Ok(self
            .complaints
            .lock()
            .unwrap()
            .iter()
            .filter(|c| scope.permits(c) && c.status == ComplaintStatus::Resolved)
            .filter_map(|c| c.resolved_at.map(|r| (c.submitted_at, r)))
            .collect())
    }
}
