//! Prints the number of stored shipping leads.

use shipping_lead_api::config::Config;
use shipping_lead_api::db::Database;
use shipping_lead_api::db_storage::{LeadStore, PgLeadStore};

/// Connects to the configured database and reports the lead count.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let db = Database::new(database_url).await?;
    let store = PgLeadStore::new(db.pool);

    let count = store.count_leads().await?;
    println!("shipping_leads: {} stored lead(s)", count);

    Ok(())
}
