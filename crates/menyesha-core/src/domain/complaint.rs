//! Complaint domain entity and lifecycle rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Community Issue Report";
pub const DEFAULT_CATEGORY: &str = "General";

/// Complaint lifecycle states. The allowed transitions are enforced at
/// update time, see [`ComplaintStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Submitted,
    InProgress,
    Resolved,
    Closed,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Submitted => "submitted",
            ComplaintStatus::InProgress => "in_progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(ComplaintStatus::Submitted),
            "in_progress" => Some(ComplaintStatus::InProgress),
            "resolved" => Some(ComplaintStatus::Resolved),
            "closed" => Some(ComplaintStatus::Closed),
            _ => None,
        }
    }

    /// Parse a caller-supplied filter value, tolerating display casing and
    /// spaces ("In Progress" -> in_progress). "All Status" means no filter.
    pub fn parse_filter(s: &str) -> Option<Self> {
        Self::from_str(&s.trim().to_lowercase().replace(' ', "_"))
    }

    /// Transition table: submitted <-> in_progress, either -> resolved,
    /// resolved <-> closed (closed can only reopen to resolved).
    pub fn can_transition_to(&self, next: ComplaintStatus) -> bool {
        use ComplaintStatus::*;
        matches!(
            (*self, next),
            (Submitted, InProgress)
                | (Submitted, Resolved)
                | (InProgress, Submitted)
                | (InProgress, Resolved)
                | (Resolved, InProgress)
                | (Resolved, Closed)
                | (Closed, Resolved)
        )
    }
}

impl Default for ComplaintStatus {
    fn default() -> Self {
        ComplaintStatus::Submitted
    }
}

/// Triage priority. Freely assignable, no ordering constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }

    /// "All Priority" and display casing tolerated, like the status filter.
    pub fn parse_filter(s: &str) -> Option<Self> {
        Self::from_str(&s.trim().to_lowercase())
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// A citizen issue report. `institution` and `sector` are free text matched
/// against admin profile names — not foreign keys — so renaming an
/// institution orphans its historical complaints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub specific_location: String,

    // Rwanda location hierarchy
    pub province: String,
    pub district: String,
    pub sector: String,
    pub cell: Option<String>,
    pub village: Option<String>,

    pub institution: Option<String>,
    pub category: String,

    pub status: ComplaintStatus,
    pub priority: Priority,

    /// Stored filenames of evidence images, in upload order.
    pub evidence_images: Vec<String>,

    /// Owning citizen; `None` marks an anonymous submission carrying the
    /// free-text contact fields below instead.
    pub citizen_id: Option<Uuid>,
    pub anonymous_name: Option<String>,
    pub anonymous_email: Option<String>,
    pub anonymous_phone: Option<String>,

    pub assigned_to_id: Option<Uuid>,

    pub submitted_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Creation parameters for a complaint; everything the submitter controls.
#[derive(Debug, Clone, Default)]
pub struct NewComplaint {
    pub title: Option<String>,
    pub description: String,
    pub specific_location: String,
    pub province: String,
    pub district: String,
    pub sector: String,
    pub cell: Option<String>,
    pub village: Option<String>,
    pub institution: Option<String>,
    pub category: Option<String>,
    pub evidence_images: Vec<String>,
    pub anonymous_name: Option<String>,
    pub anonymous_email: Option<String>,
    pub anonymous_phone: Option<String>,
}

impl Complaint {
    /// Status always starts at `submitted`, priority at `medium`.
    pub fn new(input: NewComplaint, citizen_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: input.description,
            specific_location: input.specific_location,
            province: input.province,
            district: input.district,
            sector: input.sector,
            cell: input.cell,
            village: input.village,
            institution: input.institution,
            category: input
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            status: ComplaintStatus::Submitted,
            priority: Priority::Medium,
            evidence_images: input.evidence_images,
            citizen_id,
            anonymous_name: input.anonymous_name,
            anonymous_email: input.anonymous_email,
            anonymous_phone: input.anonymous_phone,
            assigned_to_id: None,
            submitted_at: Utc::now(),
            resolved_at: None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.citizen_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_complaint_defaults() {
        let complaint = Complaint::new(
            NewComplaint {
                description: "Pothole".into(),
                specific_location: "Main St".into(),
                province: "Kigali".into(),
                district: "Gasabo".into(),
                sector: "Remera".into(),
                ..Default::default()
            },
            None,
        );
        assert_eq!(complaint.status, ComplaintStatus::Submitted);
        assert_eq!(complaint.priority, Priority::Medium);
        assert_eq!(complaint.title, DEFAULT_TITLE);
        assert_eq!(complaint.category, DEFAULT_CATEGORY);
        assert!(complaint.is_anonymous());
        assert!(complaint.resolved_at.is_none());
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        let complaint = Complaint::new(
            NewComplaint {
                title: Some("   ".into()),
                description: "d".into(),
                specific_location: "l".into(),
                province: "p".into(),
                district: "d".into(),
                sector: "s".into(),
                ..Default::default()
            },
            None,
        );
        assert_eq!(complaint.title, DEFAULT_TITLE);
    }

    #[test]
    fn transition_table_matrix() {
        use ComplaintStatus::*;
        let allowed = [
            (Submitted, InProgress),
            (Submitted, Resolved),
            (InProgress, Submitted),
            (InProgress, Resolved),
            (Resolved, InProgress),
            (Resolved, Closed),
            (Closed, Resolved),
        ];
        for from in [Submitted, InProgress, Resolved, Closed] {
            for to in [Submitted, InProgress, Resolved, Closed] {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{} -> {}",
                    from.as_str(),
                    to.as_str()
                );
            }
        }
    }

    #[test]
    fn filter_parsing_normalizes_display_values() {
        assert_eq!(
            ComplaintStatus::parse_filter("In Progress"),
            Some(ComplaintStatus::InProgress)
        );
        assert_eq!(
            ComplaintStatus::parse_filter("resolved"),
            Some(ComplaintStatus::Resolved)
        );
        assert_eq!(ComplaintStatus::parse_filter("All Status"), None);
        assert_eq!(Priority::parse_filter("URGENT"), Some(Priority::Urgent));
        assert_eq!(Priority::parse_filter("All Priority"), None);
    }
}
