//! Complaint submission, scoped listing, and triage updates

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Complaint, ComplaintStatus, NewComplaint, Principal, Priority};
use crate::error::DomainError;
use crate::repositories::{ComplaintFilter, ComplaintRepository};

pub struct ComplaintService {
    complaint_repo: Arc<dyn ComplaintRepository>,
}

impl ComplaintService {
    pub fn new(complaint_repo: Arc<dyn ComplaintRepository>) -> Self {
        Self { complaint_repo }
    }

    /// Submit a complaint. Any authenticated caller becomes the owning
    /// citizen; anonymous submissions keep the free-text contact fields.
    pub async fn submit(
        &self,
        input: NewComplaint,
        principal: &Principal,
    ) -> Result<Complaint, DomainError> {
        let citizen_id = principal.user_id();
        let complaint = Complaint::new(input, citizen_id);

        let created = self.complaint_repo.create(&complaint).await?;

        info!(
            "Complaint {} submitted ({})",
            created.id,
            if created.is_anonymous() {
                "anonymous"
            } else {
                "authenticated"
            }
        );

        Ok(created)
    }

    /// Role-scoped listing with optional status/priority filters, newest
    /// first. Anonymous callers must authenticate to list.
    pub async fn list(
        &self,
        principal: &Principal,
        status: Option<ComplaintStatus>,
        priority: Option<Priority>,
    ) -> Result<Vec<Complaint>, DomainError> {
        let scope = principal
            .complaint_scope()
            .ok_or(DomainError::Unauthenticated)?;

        self.complaint_repo
            .list(&ComplaintFilter {
                scope,
                status,
                priority,
            })
            .await
    }

    /// Transition a complaint's status. The transition table is enforced;
    /// moving to `resolved` stamps `resolved_at` in the same write. A
    /// complaint outside the caller's triage scope reads as not found.
    pub async fn update_status(
        &self,
        principal: &Principal,
        id: &Uuid,
        next: ComplaintStatus,
    ) -> Result<Complaint, DomainError> {
        let mut complaint = self.scoped_for_triage(principal, id).await?;

        if !complaint.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: complaint.status.as_str().into(),
                to: next.as_str().into(),
            });
        }

        complaint.status = next;
        if next == ComplaintStatus::Resolved {
            complaint.resolved_at = Some(Utc::now());
        }

        let updated = self.complaint_repo.update(&complaint).await?;
        info!("Complaint {} moved to {}", updated.id, next.as_str());
        Ok(updated)
    }

    /// Reassign priority; free assignment, no ordering constraint.
    pub async fn update_priority(
        &self,
        principal: &Principal,
        id: &Uuid,
        priority: Priority,
    ) -> Result<Complaint, DomainError> {
        let mut complaint = self.scoped_for_triage(principal, id).await?;

        complaint.priority = priority;

        let updated = self.complaint_repo.update(&complaint).await?;
        info!("Complaint {} priority set to {}", updated.id, priority.as_str());
        Ok(updated)
    }

    async fn scoped_for_triage(
        &self,
        principal: &Principal,
        id: &Uuid,
    ) -> Result<Complaint, DomainError> {
        let scope = principal.triage_scope()?;

        let complaint = self
            .complaint_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Complaint not found".into()))?;

        // Out-of-scope records are invisible, matching the listing semantics.
        if !scope.permits(&complaint) {
            return Err(DomainError::NotFound("Complaint not found".into()));
        }

        Ok(complaint)
    }
}
