//! Lead submission pipeline.
//!
//! parse → sanitize → validate → store → count → insert → notify, strictly in
//! that order. Collaborator failures degrade the response instead of failing
//! it; only a failed insert whose email fallback also fails is an error.
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::db_storage::LeadStore;
use crate::errors::AppError;
use crate::lead_intake::{
    derive_attributes, generate_reference_number, missing_required_fields, sanitize_submission,
};
use crate::models::{DerivedAttributes, LeadResponse, NewLeadRecord, SanitizedLead};
use crate::notification::LeadNotification;
use crate::outcome::{SubmissionOutcome, SubmissionReport};
use crate::resend_client::LeadNotifier;

pub struct LeadSubmissionService {
    store: Option<Arc<dyn LeadStore>>,
    notifier: Arc<dyn LeadNotifier>,
}

impl LeadSubmissionService {
    /// `store` is `None` when no record store could be acquired.
    pub fn new(store: Option<Arc<dyn LeadStore>>, notifier: Arc<dyn LeadNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Runs one submission through the pipeline.
    ///
    /// # Arguments
    ///
    /// * `body` - Raw request body, expected to be a JSON object.
    ///
    /// # Returns
    ///
    /// * `Ok(LeadResponse)` - The lead was confirmed by the store or the email service
    ///   (or the store was unavailable and email was attempted).
    /// * `Err(AppError::BadRequest)` - Invalid JSON or missing required fields.
    /// * `Err(AppError::SaveFailed)` - Both the insert and the email fallback failed.
    pub async fn submit(&self, body: &[u8]) -> Result<LeadResponse, AppError> {
        let submission: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::warn!("Error parsing request body: {}", e);
            AppError::BadRequest("Invalid JSON in request body".to_string())
        })?;
        tracing::debug!("Received form data: {}", submission);

        let lead = sanitize_submission(&submission);
        tracing::info!(
            "📨 Lead submission: company={}, country={}",
            lead.company,
            lead.country
        );

        let missing = missing_required_fields(&lead);
        if !missing.is_empty() {
            tracing::warn!("❌ Missing required fields: {:?}", missing);
            return Err(AppError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let derived = derive_attributes(&lead);

        let Some(store) = self.store.as_ref() else {
            return self.submit_email_only(&lead, &derived).await;
        };

        let lead_count = match store.count_leads().await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("⚠️  Error getting lead count: {}", e);
                None
            }
        };

        let reference_number = generate_reference_number(Utc::now());
        let record = NewLeadRecord::new(&lead, &derived, &reference_number);

        let (lead_id, db_error) = match store.insert_lead(&record).await {
            Ok(stored) => (Some(stored.id), None),
            Err(e) => {
                tracing::error!("❌ Error inserting lead {}: {}", reference_number, e);
                (None, Some(e.detail()))
            }
        };

        let email_sent = self
            .notify(&lead, &derived, lead_id, &reference_number, lead_count)
            .await;

        let outcome = SubmissionOutcome::decide(true, db_error.is_none(), email_sent);
        tracing::info!(
            "Lead {} finished: {:?} (email_sent={})",
            reference_number,
            outcome,
            email_sent
        );

        outcome.respond(SubmissionReport {
            reference_number,
            lead_id,
            email_sent,
            db_error,
        })
    }

    /// First fallback tier: no store, so the notification is the only record.
    async fn submit_email_only(
        &self,
        lead: &SanitizedLead,
        derived: &DerivedAttributes,
    ) -> Result<LeadResponse, AppError> {
        tracing::warn!("⚠️  Record store unavailable - submitting lead via email only");

        let reference_number = generate_reference_number(Utc::now());
        let email_sent = self
            .notify(lead, derived, None, &reference_number, None)
            .await;

        SubmissionOutcome::decide(false, false, email_sent).respond(SubmissionReport {
            reference_number,
            lead_id: None,
            email_sent,
            db_error: None,
        })
    }

    /// Sends the notification; failures are logged and reported as `false`.
    async fn notify(
        &self,
        lead: &SanitizedLead,
        derived: &DerivedAttributes,
        lead_id: Option<Uuid>,
        reference_number: &str,
        lead_count: Option<i64>,
    ) -> bool {
        let message = LeadNotification {
            lead,
            derived,
            lead_id,
            reference_number,
            lead_count,
            submitted_at: Utc::now(),
        }
        .render();

        match self.notifier.send(&message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("⚠️  Error sending lead notification: {}", e);
                false
            }
        }
    }
}
