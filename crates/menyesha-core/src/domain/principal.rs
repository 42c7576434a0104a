//! Request principal and complaint scoping

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::complaint::Complaint;
use crate::error::DomainError;

/// The authenticated (or anonymous) identity of a request, carrying the
/// role-specific scoping key. Produced once per request by the
/// authentication layer; handlers never re-derive role logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Principal {
    Anonymous,
    Citizen {
        id: Uuid,
    },
    InstitutionAdmin {
        id: Uuid,
        institution_name: String,
    },
    SectorAdmin {
        id: Uuid,
        sector_name: String,
    },
    SuperAdmin {
        id: Uuid,
    },
}

/// The subset of complaints a principal may see (and, for admins, triage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintScope {
    All,
    CitizenOwned(Uuid),
    Institution(String),
    Sector(String),
}

impl ComplaintScope {
    /// Whether a complaint falls inside this scope. Institution and sector
    /// scoping is plain string equality against the admin's profile name.
    pub fn permits(&self, complaint: &Complaint) -> bool {
        match self {
            ComplaintScope::All => true,
            ComplaintScope::CitizenOwned(id) => complaint.citizen_id == Some(*id),
            ComplaintScope::Institution(name) => {
                complaint.institution.as_deref() == Some(name.as_str())
            }
            ComplaintScope::Sector(name) => complaint.sector == *name,
        }
    }
}

impl Principal {
    /// Listing scope, `None` for anonymous callers (they must authenticate
    /// to list anything).
    pub fn complaint_scope(&self) -> Option<ComplaintScope> {
        match self {
            Principal::Anonymous => None,
            Principal::Citizen { id } => Some(ComplaintScope::CitizenOwned(*id)),
            Principal::InstitutionAdmin {
                institution_name, ..
            } => Some(ComplaintScope::Institution(institution_name.clone())),
            Principal::SectorAdmin { sector_name, .. } => {
                Some(ComplaintScope::Sector(sector_name.clone()))
            }
            Principal::SuperAdmin { .. } => Some(ComplaintScope::All),
        }
    }

    /// Scope inside which this principal may update status/priority.
    /// Citizens are read-only over their own complaints.
    pub fn triage_scope(&self) -> Result<ComplaintScope, DomainError> {
        match self {
            Principal::Anonymous => Err(DomainError::Unauthenticated),
            Principal::Citizen { .. } => Err(DomainError::Forbidden(
                "Citizens cannot update complaints".into(),
            )),
            Principal::InstitutionAdmin {
                institution_name, ..
            } => Ok(ComplaintScope::Institution(institution_name.clone())),
            Principal::SectorAdmin { sector_name, .. } => {
                Ok(ComplaintScope::Sector(sector_name.clone()))
            }
            Principal::SuperAdmin { .. } => Ok(ComplaintScope::All),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Principal::Anonymous => None,
            Principal::Citizen { id }
            | Principal::InstitutionAdmin { id, .. }
            | Principal::SectorAdmin { id, .. }
            | Principal::SuperAdmin { id } => Some(*id),
        }
    }

    pub fn require_citizen(&self) -> Result<Uuid, DomainError> {
        match self {
            Principal::Citizen { id } => Ok(*id),
            Principal::Anonymous => Err(DomainError::Unauthenticated),
            _ => Err(DomainError::Forbidden("Citizen access required".into())),
        }
    }

    pub fn require_institution_admin(&self) -> Result<(Uuid, &str), DomainError> {
        match self {
            Principal::InstitutionAdmin {
                id,
                institution_name,
            } => Ok((*id, institution_name.as_str())),
            Principal::Anonymous => Err(DomainError::Unauthenticated),
            _ => Err(DomainError::Forbidden(
                "Institution admin access required".into(),
            )),
        }
    }

    pub fn require_sector_admin(&self) -> Result<(Uuid, &str), DomainError> {
        match self {
            Principal::SectorAdmin { id, sector_name } => Ok((*id, sector_name.as_str())),
            Principal::Anonymous => Err(DomainError::Unauthenticated),
            _ => Err(DomainError::Forbidden("Sector admin access required".into())),
        }
    }

    pub fn require_super_admin(&self) -> Result<(), DomainError> {
        match self {
            Principal::SuperAdmin { .. } => Ok(()),
            Principal::Anonymous => Err(DomainError::Unauthenticated),
            _ => Err(DomainError::Forbidden("Super admin access required".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::complaint::NewComplaint;

    fn complaint(institution: Option<&str>, sector: &str, citizen: Option<Uuid>) -> Complaint {
        Complaint::new(
            NewComplaint {
                description: "d".into(),
                specific_location: "l".into(),
                province: "Kigali".into(),
                district: "Gasabo".into(),
                sector: sector.into(),
                institution: institution.map(Into::into),
                ..Default::default()
            },
            citizen,
        )
    }

    #[test]
    fn anonymous_has_no_listing_scope() {
        assert!(Principal::Anonymous.complaint_scope().is_none());
    }

    #[test]
    fn citizen_scope_only_matches_own_complaints() {
        let me = Uuid::new_v4();
        let scope = Principal::Citizen { id: me }.complaint_scope().unwrap();
        assert!(scope.permits(&complaint(None, "Remera", Some(me))));
        assert!(!scope.permits(&complaint(None, "Remera", Some(Uuid::new_v4()))));
        assert!(!scope.permits(&complaint(None, "Remera", None)));
    }

    #[test]
    fn institution_scope_is_exact_string_match() {
        let scope = Principal::InstitutionAdmin {
            id: Uuid::new_v4(),
            institution_name: "REG".into(),
        }
        .complaint_scope()
        .unwrap();
        assert!(scope.permits(&complaint(Some("REG"), "Remera", None)));
        assert!(!scope.permits(&complaint(Some("WASAC"), "Remera", None)));
        assert!(!scope.permits(&complaint(None, "Remera", None)));
    }

    #[test]
    fn sector_scope_matches_sector_field() {
        let scope = Principal::SectorAdmin {
            id: Uuid::new_v4(),
            sector_name: "Remera".into(),
        }
        .complaint_scope()
        .unwrap();
        assert!(scope.permits(&complaint(None, "Remera", None)));
        assert!(!scope.permits(&complaint(None, "Kimironko", None)));
    }

    #[test]
    fn citizens_cannot_triage() {
        let principal = Principal::Citizen { id: Uuid::new_v4() };
        assert!(matches!(
            principal.triage_scope(),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn super_admin_triages_everything() {
        let principal = Principal::SuperAdmin { id: Uuid::nil() };
        assert_eq!(principal.triage_scope().unwrap(), ComplaintScope::All);
    }

    #[test]
    fn role_gates() {
        let citizen = Principal::Citizen { id: Uuid::new_v4() };
        assert!(citizen.require_citizen().is_ok());
        assert!(citizen.require_super_admin().is_err());
        assert!(Principal::Anonymous.require_citizen().is_err());
        assert!(Principal::SuperAdmin { id: Uuid::nil() }
            .require_super_admin()
            .is_ok());
    }
}
