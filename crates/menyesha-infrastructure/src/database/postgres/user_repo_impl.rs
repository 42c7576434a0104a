//! PostgreSQL user repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, QueryBuilder};
use tracing::{error, info};
use uuid::Uuid;

use menyesha_core::error::DomainError;
use menyesha_core::repositories::{UserListFilter, UserRepository};
use menyesha_core::{User, UserRole, UserStatus};

const USER_COLUMNS: &str = "\
    id, full_name, email, password_hash, phone, role, status, \
    id_type, id_card, \
    institution_name, institution_code, institution_category, \
    institution_address, institution_description, \
    sector_name, sector_code, province, district, \
    created_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    full_name: String,
    email: String,
    password_hash: String,
    phone: String,
    role: String,
    status: String,
    id_type: Option<String>,
    id_card: Option<String>,
    institution_name: Option<String>,
    institution_code: Option<String>,
    institution_category: Option<String>,
    institution_address: Option<String>,
    institution_description: Option<String>,
    sector_name: Option<String>,
    sector_code: Option<String>,
    province: Option<String>,
    district: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            password_hash: row.password_hash,
            phone: row.phone,
            role: UserRole::from_str(&row.role).unwrap_or_default(),
            status: UserStatus::from_str(&row.status).unwrap_or_default(),
            id_type: row.id_type,
            id_card: row.id_card,
            institution_name: row.institution_name,
            institution_code: row.institution_code,
            institution_category: row.institution_category,
            institution_address: row.institution_address,
            institution_description: row.institution_description,
            sector_name: row.sector_name,
            sector_code: row.sector_code,
            province: row.province,
            district: row.district,
            created_at: row.created_at,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding user by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        // Emails are unique case-sensitively, as stored.
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("finding user by email", e))?;

        Ok(row.map(Into::into))
    }

    async fn find_admin_by_code(
        &self,
        role: UserRole,
        code: &str,
    ) -> Result<Option<User>, DomainError> {
        let column = match role {
            UserRole::InstitutionAdmin => "institution_code",
            UserRole::SectorAdmin => "sector_code",
            _ => return Ok(None),
        };

        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 AND {column} = $2"
        ))
        .bind(role.as_str())
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding admin by code", e))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        info!("Creating user with email: {}", user.email);

        let row: UserRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO users (
                id, full_name, email, password_hash, phone, role, status,
                id_type, id_card,
                institution_name, institution_code, institution_category,
                institution_address, institution_description,
                sector_name, sector_code, province, district,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(&user.id_type)
        .bind(&user.id_card)
        .bind(&user.institution_name)
        .bind(&user.institution_code)
        .bind(&user.institution_category)
        .bind(&user.institution_address)
        .bind(&user.institution_description)
        .bind(&user.sector_name)
        .bind(&user.sector_code)
        .bind(&user.province)
        .bind(&user.district)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating user: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                if msg.contains("email") {
                    DomainError::EmailAlreadyExists(user.email.clone())
                } else {
                    DomainError::CodeAlreadyExists(
                        user.institution_code
                            .clone()
                            .or_else(|| user.sector_code.clone())
                            .unwrap_or_default(),
                    )
                }
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        info!("User created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn set_status(
        &self,
        id: &Uuid,
        status: UserStatus,
    ) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET status = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating user status", e))?;

        Ok(row.map(Into::into))
    }

    async fn set_status_for_role(
        &self,
        role: UserRole,
        from: UserStatus,
        to: UserStatus,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query("UPDATE users SET status = $3 WHERE role = $1 AND status = $2")
            .bind(role.as_str())
            .bind(from.as_str())
            .bind(to.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("bulk updating user status", e))?;

        Ok(result.rows_affected())
    }

    async fn list(&self, filter: &UserListFilter) -> Result<Vec<User>, DomainError> {
        let mut query = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE 1=1"));
        if let Some(role) = filter.role {
            query.push(" AND role = ").push_bind(role.as_str());
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        query.push(" ORDER BY created_at DESC");

        let rows: Vec<UserRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing users", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &UserListFilter) -> Result<i64, DomainError> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM users WHERE 1=1");
        if let Some(role) = filter.role {
            query.push(" AND role = ").push_bind(role.as_str());
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }

        query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting users", e))
    }
}
