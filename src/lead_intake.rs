//! Pure lead intake logic shared by the submission pipeline.
//!
//! Everything here is free of I/O:
//! 1. Sanitize the untrusted submission into a `SanitizedLead`
//! 2. Check required fields
//! 3. Derive package type, shipping method and country code
//! 4. Generate the human-facing reference number
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

use crate::models::{DerivedAttributes, SanitizedLead};

/// Fields that must be non-empty after sanitization, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "email", "phone", "company", "country"];

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("static regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Small,
    Medium,
    Large,
    Custom,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Small => "small",
            PackageType::Medium => "medium",
            PackageType::Large => "large",
            PackageType::Custom => "custom",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    Air,
    Sea,
}

impl ShippingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Air => "air",
            ShippingMethod::Sea => "sea",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PACKAGE_TYPES: [(&str, PackageType); 3] = [
    ("E-commerce", PackageType::Small),
    ("Manufacturing", PackageType::Large),
    ("Retail", PackageType::Medium),
];

const AIR_FREIGHT_COUNTRIES: [&str; 2] = ["Singapore", "Malaysia"];

const COUNTRY_CODES: [(&str, &str); 4] = [
    ("Singapore", "SG"),
    ("Malaysia", "MY"),
    ("Taiwan", "TW"),
    ("Dubai", "AE"),
];

/// Code used for countries missing from the lookup table.
pub const UNKNOWN_COUNTRY_CODE: &str = "XX";

/// Sanitizes an untrusted submission.
///
/// A body that is not a JSON object yields an all-empty lead, which then
/// fails the required-field check.
pub fn sanitize_submission(submission: &Value) -> SanitizedLead {
    let field = |name: &str| coerce_text(submission.get(name));

    SanitizedLead {
        name: field("name"),
        email: field("email"),
        phone: field("phone"),
        company: field("company"),
        business_type: field("businessType"),
        country: field("country"),
        additional_info: field("additionalInfo"),
        contact_method: field("contactMethod"),
        monthly_shipments: parse_monthly_shipments(submission.get("monthlyShipments")),
    }
}

/// Coerces any JSON value to trimmed text; falsy values become empty.
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        // Zero is falsy and coerces to empty like `false`.
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Parses `monthlyShipments` into a non-negative count.
///
/// Strings have every non-digit stripped before parsing ("1,200 units" -> 1200).
pub fn parse_monthly_shipments(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_i64() {
                v.max(0)
            } else if let Some(v) = n.as_u64() {
                i64::try_from(v).unwrap_or(0)
            } else {
                n.as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0 && *v < i64::MAX as f64)
                    .map(|v| v.trunc() as i64)
                    .unwrap_or(0)
            }
        }
        Some(Value::String(s)) => NON_DIGITS.replace_all(s, "").parse().unwrap_or(0),
        _ => 0,
    }
}

/// Returns the required fields that are empty, in `REQUIRED_FIELDS` order.
pub fn missing_required_fields(lead: &SanitizedLead) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| {
            let value = match *field {
                "name" => &lead.name,
                "email" => &lead.email,
                "phone" => &lead.phone,
                "company" => &lead.company,
                _ => &lead.country,
            };
            value.is_empty()
        })
        .collect()
}

pub fn determine_package_type(business_type: &str) -> PackageType {
    PACKAGE_TYPES
        .iter()
        .find(|(name, _)| *name == business_type)
        .map(|(_, package)| *package)
        .unwrap_or(PackageType::Custom)
}

pub fn determine_shipping_method(country: &str) -> ShippingMethod {
    if AIR_FREIGHT_COUNTRIES.contains(&country) {
        ShippingMethod::Air
    } else {
        ShippingMethod::Sea
    }
}

pub fn country_code(country: &str) -> &'static str {
    COUNTRY_CODES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, code)| *code)
        .unwrap_or(UNKNOWN_COUNTRY_CODE)
}

pub fn derive_attributes(lead: &SanitizedLead) -> DerivedAttributes {
    DerivedAttributes {
        package_type: determine_package_type(&lead.business_type),
        shipping_method: determine_shipping_method(&lead.country),
        country_code: country_code(&lead.country),
    }
}

/// `EST` followed by the last 8 digits of the millisecond timestamp.
///
/// Not collision-checked: two submissions in the same millisecond share a number.
pub fn generate_reference_number(now: DateTime<Utc>) -> String {
    format!("EST{:08}", now.timestamp_millis().rem_euclid(100_000_000))
}
