use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::lead_intake::{PackageType, ShippingMethod};

// ============ Domain Models ============

/// A lead submission after sanitization.
///
/// Every text field is trimmed and empty when absent; `monthly_shipments`
/// is a non-negative integer defaulting to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub business_type: String,
    pub country: String,
    pub additional_info: String,
    pub contact_method: String,
    pub monthly_shipments: i64,
}

/// Presentation fields computed from a sanitized lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAttributes {
    pub package_type: PackageType,
    pub shipping_method: ShippingMethod,
    pub country_code: &'static str,
}

// ============ Database Models ============

/// Row written to `shipping_leads` for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLeadRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub business_type: String,
    /// Two-letter country code.
    pub country: String,
    /// Country as submitted.
    pub country_name: String,
    pub package_type: PackageType,
    pub shipping_method: ShippingMethod,
    pub monthly_shipments: i64,
    pub additional_info: String,
    pub contact_method: String,
    pub status: String,
    pub reference_number: String,
}

impl NewLeadRecord {
    /// Status assigned to every freshly inserted lead.
    pub const INITIAL_STATUS: &'static str = "NEW";

    pub fn new(lead: &SanitizedLead, derived: &DerivedAttributes, reference_number: &str) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            business_type: lead.business_type.clone(),
            country: derived.country_code.to_string(),
            country_name: lead.country.clone(),
            package_type: derived.package_type,
            shipping_method: derived.shipping_method,
            monthly_shipments: lead.monthly_shipments,
            additional_info: lead.additional_info.clone(),
            contact_method: lead.contact_method.clone(),
            status: Self::INITIAL_STATUS.to_string(),
            reference_number: reference_number.to_string(),
        }
    }
}

/// Columns returned by the store after a successful insert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StoredLead {
    /// Server-assigned identifier.
    pub id: Uuid,
    pub reference_number: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// ============ API Models ============

/// Success body returned by the lead intake endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
    /// Store error text when the lead was only delivered by email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_error: Option<String>,
}

/// Failure body shared by every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
