use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::{NewLeadRecord, StoredLead};

/// Record store for shipping leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Exact number of leads stored so far.
    async fn count_leads(&self) -> Result<i64, AppError>;

    /// Inserts one lead and returns the stored row with its assigned id.
    async fn insert_lead(&self, lead: &NewLeadRecord) -> Result<StoredLead, AppError>;
}

/// Postgres-backed lead store over the `shipping_leads` table.
#[derive(Clone)]
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn count_leads(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shipping_leads")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert_lead(&self, lead: &NewLeadRecord) -> Result<StoredLead, AppError> {
        let stored = sqlx::query_as::<_, StoredLead>(
            r#"
            INSERT INTO shipping_leads (
                name,
                email,
                phone,
                company,
                business_type,
                country,
                country_name,
                package_type,
                shipping_method,
                monthly_shipments,
                additional_info,
                contact_method,
                status,
                reference_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, reference_number, status, created_at
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.company)
        .bind(&lead.business_type)
        .bind(&lead.country)
        .bind(&lead.country_name)
        .bind(lead.package_type.as_str())
        .bind(lead.shipping_method.as_str())
        .bind(lead.monthly_shipments)
        .bind(&lead.additional_info)
        .bind(&lead.contact_method)
        .bind(&lead.status)
        .bind(&lead.reference_number)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            "✓ Lead stored: id={}, reference={}",
            stored.id,
            stored.reference_number
        );
        Ok(stored)
    }
}
