use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::config::Config;
use crate::errors::AppError;
use crate::notification::EmailMessage;

/// Delivers lead notifications to the fixed recipient.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError>;
}

/// Client for the Resend email API.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    from: String,
    to: Option<String>,
}

impl ResendClient {
    /// Creates a new `ResendClient` from the notification settings in `config`.
    ///
    /// A missing API key or recipient is not an error here; every send fails instead.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create Resend client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.resend_base_url.trim_end_matches('/').to_string(),
            api_key: config.resend_api_key.clone(),
            from: config.notification_from.clone(),
            to: config.notification_email.clone(),
        })
    }
}

#[async_trait]
impl LeadNotifier for ResendClient {
    /// Sends one email.
    ///
    /// Transport errors and non-2xx responses are both failures.
    async fn send(&self, message: &EmailMessage) -> Result<(), AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::ExternalApiError("RESEND_API_KEY not configured".to_string())
        })?;
        let to = self.to.as_deref().ok_or_else(|| {
            AppError::ExternalApiError("NOTIFICATION_EMAIL not configured".to_string())
        })?;

        let url = format!("{}/emails", self.base_url);
        tracing::info!("Sending lead notification via Resend API: {}", message.subject);

        let body = json!({
            "from": self.from,
            "to": to,
            "subject": message.subject,
            "html": message.html,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Resend returned {}: {}",
                status, error_text
            )));
        }

        let data: serde_json::Value = response.json().await.unwrap_or_default();
        let email_id = data.get("id").and_then(|v| v.as_str()).unwrap_or("unknown");

        tracing::info!("✓ Lead notification sent: {}", email_id);
        Ok(())
    }
}
