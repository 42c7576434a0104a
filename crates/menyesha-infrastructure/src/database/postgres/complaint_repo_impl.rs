//! PostgreSQL complaint repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{error, info};
use uuid::Uuid;

use menyesha_core::error::DomainError;
use menyesha_core::repositories::{ComplaintFilter, ComplaintRepository};
use menyesha_core::{Complaint, ComplaintScope, ComplaintStatus, Priority};

const COMPLAINT_COLUMNS: &str = "\
    id, title, description, specific_location, \
    province, district, sector, cell, village, \
    institution, category, status, priority, \
    evidence_images, citizen_id, \
    anonymous_name, anonymous_email, anonymous_phone, \
    assigned_to_id, submitted_at, resolved_at";

pub struct PgComplaintRepository {
    pool: PgPool,
}

impl PgComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ComplaintRow {
    id: Uuid,
    title: String,
    description: String,
    specific_location: String,
    province: String,
    district: String,
    sector: String,
    cell: Option<String>,
    village: Option<String>,
    institution: Option<String>,
    category: String,
    status: String,
    priority: String,
    evidence_images: Json<Vec<String>>,
    citizen_id: Option<Uuid>,
    anonymous_name: Option<String>,
    anonymous_email: Option<String>,
    anonymous_phone: Option<String>,
    assigned_to_id: Option<Uuid>,
    submitted_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl From<ComplaintRow> for Complaint {
    fn from(row: ComplaintRow) -> Self {
        Complaint {
            id: row.id,
            title: row.title,
            description: row.description,
            specific_location: row.specific_location,
            province: row.province,
            district: row.district,
            sector: row.sector,
            cell: row.cell,
            village: row.village,
            institution: row.institution,
            category: row.category,
            status: ComplaintStatus::from_str(&row.status).unwrap_or_default(),
            priority: Priority::from_str(&row.priority).unwrap_or_default(),
            evidence_images: row.evidence_images.0,
            citizen_id: row.citizen_id,
            anonymous_name: row.anonymous_name,
            anonymous_email: row.anonymous_email,
            anonymous_phone: row.anonymous_phone,
            assigned_to_id: row.assigned_to_id,
            submitted_at: row.submitted_at,
            resolved_at: row.resolved_at,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

/// Append the role-scope predicate. Institution and sector scoping is plain
/// string equality against the admin's profile name.
fn push_scope(query: &mut QueryBuilder<'_, Postgres>, scope: &ComplaintScope) {
    match scope {
        ComplaintScope::All => {}
        ComplaintScope::CitizenOwned(id) => {
            query.push(" AND citizen_id = ").push_bind(*id);
        }
        ComplaintScope::Institution(name) => {
            query.push(" AND institution = ").push_bind(name.clone());
        }
        ComplaintScope::Sector(name) => {
            query.push(" AND sector = ").push_bind(name.clone());
        }
    }
}

#[async_trait]
impl ComplaintRepository for PgComplaintRepository {
    async fn create(&self, complaint: &Complaint) -> Result<Complaint, DomainError> {
        let row: ComplaintRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO complaints (
                id, title, description, specific_location,
                province, district, sector, cell, village,
                institution, category, status, priority,
                evidence_images, citizen_id,
                anonymous_name, anonymous_email, anonymous_phone,
                assigned_to_id, submitted_at, resolved_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING {COMPLAINT_COLUMNS}
            "#
        ))
        .bind(complaint.id)
        .bind(&complaint.title)
        .bind(&complaint.description)
        .bind(&complaint.specific_location)
        .bind(&complaint.province)
        .bind(&complaint.district)
        .bind(&complaint.sector)
        .bind(&complaint.cell)
        .bind(&complaint.village)
        .bind(&complaint.institution)
        .bind(&complaint.category)
        .bind(complaint.status.as_str())
        .bind(complaint.priority.as_str())
        .bind(Json(&complaint.evidence_images))
        .bind(complaint.citizen_id)
        .bind(&complaint.anonymous_name)
        .bind(&complaint.anonymous_email)
        .bind(&complaint.anonymous_phone)
        .bind(complaint.assigned_to_id)
        .bind(complaint.submitted_at)
        .bind(complaint.resolved_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating complaint", e))?;

        info!("Complaint created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Complaint>, DomainError> {
        let row: Option<ComplaintRow> = sqlx::query_as(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding complaint by id", e))?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, complaint: &Complaint) -> Result<Complaint, DomainError> {
        let row: ComplaintRow = sqlx::query_as(&format!(
            r#"
            UPDATE complaints
            SET
                title = $2,
                description = $3,
                specific_location = $4,
                province = $5,
                district = $6,
                sector = $7,
                cell = $8,
                village = $9,
                institution = $10,
                category = $11,
                status = $12,
                priority = $13,
                evidence_images = $14,
                anonymous_name = $15,
                anonymous_email = $16,
                anonymous_phone = $17,
                assigned_to_id = $18,
                resolved_at = $19
            WHERE id = $1
            RETURNING {COMPLAINT_COLUMNS}
            "#
        ))
        .bind(complaint.id)
        .bind(&complaint.title)
        .bind(&complaint.description)
        .bind(&complaint.specific_location)
        .bind(&complaint.province)
        .bind(&complaint.district)
        .bind(&complaint.sector)
        .bind(&complaint.cell)
        .bind(&complaint.village)
        .bind(&complaint.institution)
        .bind(&complaint.category)
        .bind(complaint.status.as_str())
        .bind(complaint.priority.as_str())
        .bind(Json(&complaint.evidence_images))
        .bind(&complaint.anonymous_name)
        .bind(&complaint.anonymous_email)
        .bind(&complaint.anonymous_phone)
        .bind(complaint.assigned_to_id)
        .bind(complaint.resolved_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("updating complaint", e))?;

        Ok(row.into())
    }

    async fn list(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, DomainError> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE 1=1"
        ));
        push_scope(&mut query, &filter.scope);
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(priority) = filter.priority {
            query.push(" AND priority = ").push_bind(priority.as_str());
        }
        query.push(" ORDER BY submitted_at DESC");

        let rows: Vec<ComplaintRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing complaints", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn recent(
        &self,
        scope: &ComplaintScope,
        limit: i64,
    ) -> Result<Vec<Complaint>, DomainError> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE 1=1"
        ));
        push_scope(&mut query, scope);
        query.push(" ORDER BY submitted_at DESC LIMIT ").push_bind(limit);

        let rows: Vec<ComplaintRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing recent complaints", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(
        &self,
        scope: &ComplaintScope,
        status: Option<ComplaintStatus>,
    ) -> Result<i64, DomainError> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM complaints WHERE 1=1");
        push_scope(&mut query, scope);
        if let Some(status) = status {
            query.push(" AND status = ").push_bind(status.as_str());
        }

        query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting complaints", e))
    }

    async fn count_since(
        &self,
        scope: &ComplaintScope,
        since: DateTime<Utc>,
    ) -> Result<i64, DomainError> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM complaints WHERE 1=1");
        push_scope(&mut query, scope);
        query.push(" AND submitted_at >= ").push_bind(since);

        query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting new complaints", e))
    }

    async fn resolution_pairs(
        &self,
        scope: &ComplaintScope,
    ) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>, DomainError> {
        let mut query = QueryBuilder::new(
            "SELECT submitted_at, resolved_at FROM complaints \
             WHERE status = 'resolved' AND resolved_at IS NOT NULL",
        );
        push_scope(&mut query, scope);

        let rows: Vec<(DateTime<Utc>, DateTime<Utc>)> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("fetching resolution pairs", e))?;

        Ok(rows)
    }
}
