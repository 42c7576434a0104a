//! Complaint repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Complaint, ComplaintScope, ComplaintStatus, Priority};
use crate::error::DomainError;

/// Role scope plus the optional caller-supplied filters, ANDed together.
#[derive(Debug, Clone)]
pub struct ComplaintFilter {
    pub scope: ComplaintScope,
    pub status: Option<ComplaintStatus>,
    pub priority: Option<Priority>,
}

impl ComplaintFilter {
    pub fn scope_only(scope: ComplaintScope) -> Self {
        Self {
            scope,
            status: None,
            priority: None,
        }
    }
}

#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn create(&self, complaint: &Complaint) -> Result<Complaint, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Complaint>, DomainError>;
    /// Full-row update; concurrent triage updates resolve last-write-wins.
    async fn update(&self, complaint: &Complaint) -> Result<Complaint, DomainError>;
    /// Ordered newest first; listing endpoints do not paginate.
    async fn list(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, DomainError>;
    async fn recent(
        &self,
        scope: &ComplaintScope,
        limit: i64,
    ) -> Result<Vec<Complaint>, DomainError>;
    async fn count(
        &self,
        scope: &ComplaintScope,
        status: Option<ComplaintStatus>,
    ) -> Result<i64, DomainError>;
    /// Count of complaints submitted at or after `since`, scoped.
    async fn count_since(
        &self,
        scope: &ComplaintScope,
        since: DateTime<Utc>,
    ) -> Result<i64, DomainError>;
    /// (submitted_at, resolved_at) pairs of resolved complaints in scope,
    /// for the average-resolution-time projection.
    async fn resolution_pairs(
        &self,
        scope: &ComplaintScope,
    ) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>, DomainError>;
}
