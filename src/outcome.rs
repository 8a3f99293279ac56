use uuid::Uuid;

use crate::errors::AppError;
use crate::models::LeadResponse;

/// How a validated submission ended, given which collaborators confirmed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Stored; the notification failed.
    Persisted,
    /// Stored and notified.
    PersistedAndNotified,
    /// No store available; the notification (if it succeeded) is the only record.
    EmailOnlyFallback,
    /// Store insert failed; the notification carried the lead.
    DbErrorEmailFallback,
    /// Neither store nor notification accepted the lead.
    HardFailure,
}

/// What the pipeline observed, used to compose the response body.
#[derive(Debug, Clone, Default)]
pub struct SubmissionReport {
    pub reference_number: String,
    pub lead_id: Option<Uuid>,
    pub email_sent: bool,
    /// Store error text when the insert failed.
    pub db_error: Option<String>,
}

impl SubmissionOutcome {
    /// `insert_succeeded` is ignored when the store was not reachable.
    pub fn decide(store_reachable: bool, insert_succeeded: bool, email_succeeded: bool) -> Self {
        match (store_reachable, insert_succeeded, email_succeeded) {
            (false, _, _) => SubmissionOutcome::EmailOnlyFallback,
            (true, true, true) => SubmissionOutcome::PersistedAndNotified,
            (true, true, false) => SubmissionOutcome::Persisted,
            (true, false, true) => SubmissionOutcome::DbErrorEmailFallback,
            (true, false, false) => SubmissionOutcome::HardFailure,
        }
    }

    /// Builds the success body, or the terminal error for `HardFailure`.
    pub fn respond(self, report: SubmissionReport) -> Result<LeadResponse, AppError> {
        let SubmissionReport {
            reference_number,
            lead_id,
            email_sent,
            db_error,
        } = report;

        match self {
            SubmissionOutcome::Persisted | SubmissionOutcome::PersistedAndNotified => {
                Ok(LeadResponse {
                    success: true,
                    message: "Lead submitted successfully".to_string(),
                    lead_id,
                    reference_number: Some(reference_number),
                    email_sent: Some(email_sent),
                    db_error: None,
                })
            }
            SubmissionOutcome::EmailOnlyFallback => Ok(LeadResponse {
                success: true,
                message: "Lead submitted via email only (database unavailable)".to_string(),
                lead_id: None,
                reference_number: Some(reference_number),
                email_sent: Some(email_sent),
                db_error: None,
            }),
            SubmissionOutcome::DbErrorEmailFallback => Ok(LeadResponse {
                success: true,
                message: "Lead submitted via email only (database error)".to_string(),
                lead_id: None,
                reference_number: Some(reference_number),
                email_sent: Some(true),
                db_error: Some(db_error.unwrap_or_default()),
            }),
            SubmissionOutcome::HardFailure => Err(AppError::SaveFailed {
                details: db_error.unwrap_or_default(),
            }),
        }
    }
}
