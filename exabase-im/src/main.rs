//! exabase-im - Exabase CSV importer binary
//!
//! One-shot batch run: taxonomy enrichment from the molecular CSV,
//! specimen records from the records CSV, then collection rows linked
//! into specimen records with molecular/sequence details attached.

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use exabase_common::config::Config;
use exabase_im::services::GbifClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting exabase-im (collection importer)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("Database: {}", config.database_path.display());

    let db_pool = exabase_common::db::init_database_pool(&config.database_path).await?;
    info!("Database connection established");

    let gbif = GbifClient::new(config.gbif_base_url.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create GBIF client: {}", e))?;

    let started_at = Utc::now();
    let run_result = exabase_im::import::run(&db_pool, &gbif, &config).await;
    let elapsed = Utc::now() - started_at;

    // Release the pool before reporting, whether the run succeeded or not
    db_pool.close().await;

    match run_result {
        Ok(summary) => {
            info!(
                records_imported = summary.records_imported,
                records_created = summary.records_created,
                records_linked = summary.records_linked,
                placeholders = summary.taxonomy_placeholders,
                elapsed_s = elapsed.num_seconds(),
                "Import finished"
            );
            Ok(())
        }
        Err(e) => {
            error!("Import aborted: {}", e);
            Err(e.into())
        }
    }
}
