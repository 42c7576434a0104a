//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Actor role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Citizen,
    InstitutionAdmin,
    SectorAdmin,
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Citizen => "citizen",
            UserRole::InstitutionAdmin => "institution_admin",
            UserRole::SectorAdmin => "sector_admin",
            UserRole::SuperAdmin => "super_admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "citizen" => Some(UserRole::Citizen),
            "institution_admin" => Some(UserRole::InstitutionAdmin),
            "sector_admin" => Some(UserRole::SectorAdmin),
            "super_admin" => Some(UserRole::SuperAdmin),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Citizen
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Active
    }
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            _ => None,
        }
    }
}

/// Institution-admin profile fields. The name is the complaint scoping key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionProfile {
    pub name: String,
    pub code: String,
    pub category: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Sector-admin profile fields. The name is the complaint scoping key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorProfile {
    pub name: String,
    pub code: String,
    pub province: Option<String>,
    pub district: Option<String>,
}

/// Account record for every actor: citizens self-register, institution and
/// sector admins are created by the super admin. Role-specific profile
/// fields are populated only for the matching role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,

    // Citizen identity document
    pub id_type: Option<String>,
    pub id_card: Option<String>,

    // Institution admin profile
    pub institution_name: Option<String>,
    pub institution_code: Option<String>,
    pub institution_category: Option<String>,
    pub institution_address: Option<String>,
    pub institution_description: Option<String>,

    // Sector admin profile
    pub sector_name: Option<String>,
    pub sector_code: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new_citizen(
        full_name: String,
        email: String,
        password_hash: String,
        phone: String,
        id_type: Option<String>,
        id_card: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            password_hash,
            phone,
            role: UserRole::Citizen,
            status: UserStatus::Active,
            id_type,
            id_card,
            institution_name: None,
            institution_code: None,
            institution_category: None,
            institution_address: None,
            institution_description: None,
            sector_name: None,
            sector_code: None,
            province: None,
            district: None,
            created_at: Utc::now(),
        }
    }

    /// Codes are normalized to uppercase on write.
    pub fn new_institution_admin(
        full_name: String,
        email: String,
        password_hash: String,
        phone: String,
        profile: InstitutionProfile,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            password_hash,
            phone,
            role: UserRole::InstitutionAdmin,
            status: UserStatus::Active,
            id_type: None,
            id_card: None,
            institution_name: Some(profile.name),
            institution_code: Some(profile.code.to_uppercase()),
            institution_category: profile.category,
            institution_address: profile.address,
            institution_description: profile.description,
            sector_name: None,
            sector_code: None,
            province: None,
            district: None,
            created_at: Utc::now(),
        }
    }

    pub fn new_sector_admin(
        full_name: String,
        email: String,
        password_hash: String,
        phone: String,
        profile: SectorProfile,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name,
            email,
            password_hash,
            phone,
            role: UserRole::SectorAdmin,
            status: UserStatus::Active,
            id_type: None,
            id_card: None,
            institution_name: None,
            institution_code: None,
            institution_category: None,
            institution_address: None,
            institution_description: None,
            sector_name: Some(profile.name),
            sector_code: Some(profile.code.to_uppercase()),
            province: profile.province,
            district: profile.district,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}
