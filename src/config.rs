use serde::Deserialize;

const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";
const DEFAULT_NOTIFICATION_FROM: &str = "Shipping Leads <onboarding@resend.dev>";

/// Per-IP rate limiting applied to the lead routes.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// `None` means the record store is not configured; submissions fall back to email only.
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub resend_api_key: Option<String>,
    pub resend_base_url: String,
    /// Fixed recipient of lead notifications.
    pub notification_email: Option<String>,
    pub notification_from: String,
    pub rate_limit: Option<RateLimitConfig>,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            database_url: optional_var("DATABASE_URL").or_else(|| optional_var("DB_URL")),
            run_migrations: optional_var("RUN_MIGRATIONS")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            resend_api_key: optional_var("RESEND_API_KEY"),
            resend_base_url: optional_var("RESEND_BASE_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_BASE_URL.to_string()),
            notification_email: optional_var("NOTIFICATION_EMAIL"),
            notification_from: optional_var("NOTIFICATION_FROM")
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_FROM.to_string()),
            rate_limit: rate_limit_from_env()?,
            max_body_bytes: optional_var("MAX_BODY_BYTES")
                .map(|v| v.parse())
                .transpose()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a positive integer"))?
                .unwrap_or(1024 * 1024),
        };

        config.validate()?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        match &config.database_url {
            Some(url) => tracing::debug!(
                "Database URL: {}...",
                url.chars().take(20).collect::<String>()
            ),
            None => tracing::warn!(
                "DATABASE_URL not set - leads will be delivered by email notification only"
            ),
        }
        if config.resend_api_key.is_none() || config.notification_email.is_none() {
            tracing::warn!(
                "RESEND_API_KEY or NOTIFICATION_EMAIL not set - email notifications will fail"
            );
        }
        tracing::debug!("Resend Base URL: {}", config.resend_base_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let base = url::Url::parse(&self.resend_base_url)
            .map_err(|e| anyhow::anyhow!("RESEND_BASE_URL is not a valid URL: {}", e))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!("RESEND_BASE_URL must start with http:// or https://");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES cannot be zero");
        }
        Ok(())
    }
}

/// Reads an environment variable, treating blank values as unset.
fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn rate_limit_from_env() -> anyhow::Result<Option<RateLimitConfig>> {
    let per_second: u64 = optional_var("RATE_LIMIT_PER_SECOND")
        .map(|v| v.parse())
        .transpose()
        .map_err(|_| anyhow::anyhow!("RATE_LIMIT_PER_SECOND must be a non-negative integer"))?
        .unwrap_or(10);
    let burst_size: u32 = optional_var("RATE_LIMIT_BURST")
        .map(|v| v.parse())
        .transpose()
        .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST must be a positive integer"))?
        .unwrap_or(20);

    if per_second == 0 {
        return Ok(None);
    }
    if burst_size == 0 {
        anyhow::bail!("RATE_LIMIT_BURST cannot be zero");
    }

    Ok(Some(RateLimitConfig {
        per_second,
        burst_size,
    }))
}
