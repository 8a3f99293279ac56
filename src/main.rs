use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shipping_lead_api::app::build_app;
use shipping_lead_api::config::Config;
use shipping_lead_api::db::Database;
use shipping_lead_api::db_storage::{LeadStore, PgLeadStore};
use shipping_lead_api::handlers::AppState;
use shipping_lead_api::resend_client::ResendClient;

/// Main entry point for the application.
///
/// Initializes logging, configuration, the record store (if configured) and
/// the email client, then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shipping_lead_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = acquire_store(&config).await;

    let notifier = ResendClient::new(&config)?;
    tracing::info!("✓ Resend client initialized");

    let app_state = Arc::new(AppState {
        config: config.clone(),
        store,
        notifier: Arc::new(notifier),
    });

    let app = build_app(app_state)?;

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Builds the record store handle.
///
/// Any failure leaves the service running without a store, so submissions
/// take the email-only path instead of failing.
async fn acquire_store(config: &Config) -> Option<Arc<dyn LeadStore>> {
    let database_url = config.database_url.as_deref()?;

    let db = match Database::connect_lazy(database_url) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to create database pool: {}", e);
            return None;
        }
    };

    if config.run_migrations {
        match db.migrate().await {
            Ok(()) => tracing::info!("✓ Database migrations applied"),
            Err(e) => tracing::error!("Failed to apply migrations: {}", e),
        }
    }

    tracing::info!("Database connection pool established");
    Some(Arc::new(PgLeadStore::new(db.pool)))
}
