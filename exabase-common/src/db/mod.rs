//! Database access for the Exabase importers
//!
//! One shared SQLite database holds the four tables the import flows
//! write to: `taxonomy`, `records`, `molecular`, and `sequences`. The
//! pool is created here and passed explicitly to every query function.

pub mod models;

use crate::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Connects to the SQLite file at `db_path`, creating it (and its parent
/// directory) if missing, then runs the table migrations.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize the importer tables
///
/// Creates taxonomy, records, molecular and sequences tables if they
/// don't exist. Count columns on records are nullable on purpose: a
/// freshly created specimen record has no counts until molecular rows
/// attach to it.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS taxonomy (
            usageKey TEXT NOT NULL,
            "order" TEXT NOT NULL DEFAULT '',
            family TEXT NOT NULL DEFAULT '',
            subfamily TEXT NOT NULL DEFAULT '',
            tribe TEXT NOT NULL DEFAULT '',
            genus TEXT NOT NULL DEFAULT '',
            subgenus TEXT NOT NULL DEFAULT '',
            species TEXT NOT NULL DEFAULT '',
            canonicalName TEXT NOT NULL,
            authorship TEXT NOT NULL DEFAULT '',
            scientificName TEXT NOT NULL DEFAULT '',
            rank TEXT NOT NULL DEFAULT '',
            isInGBIF INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            usageKey TEXT NOT NULL,
            identifiedBy TEXT NOT NULL DEFAULT '',
            dateIdentified TEXT NOT NULL DEFAULT '',
            identificationQualifier TEXT NOT NULL DEFAULT '',
            typeStatus TEXT NOT NULL DEFAULT '',
            num_m INTEGER,
            num_f INTEGER,
            num_nosex INTEGER,
            num_mol INTEGER,
            countryCode TEXT NOT NULL DEFAULT '',
            stateProvince TEXT NOT NULL DEFAULT '',
            locality TEXT NOT NULL DEFAULT '',
            elevation TEXT NOT NULL DEFAULT '',
            verbatimLatitude TEXT NOT NULL DEFAULT '',
            verbatimLongitude TEXT NOT NULL DEFAULT '',
            decimalLatitude TEXT NOT NULL DEFAULT '',
            decimalLongitude TEXT NOT NULL DEFAULT '',
            eventDate TEXT NOT NULL DEFAULT '',
            recordedBy TEXT NOT NULL DEFAULT '',
            biog_reg TEXT NOT NULL DEFAULT '',
            institutionID TEXT NOT NULL DEFAULT '',
            basisOfRecord TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS molecular (
            collection_id TEXT NOT NULL,
            linking_id INTEGER NOT NULL,
            sex TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT '',
            lifeStage TEXT NOT NULL DEFAULT '',
            bodypart TEXT NOT NULL DEFAULT '',
            preservation TEXT NOT NULL DEFAULT '',
            localisation TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sequences (
            type TEXT NOT NULL DEFAULT '',
            accession TEXT NOT NULL DEFAULT '',
            collection_id TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (taxonomy, records, molecular, sequences)");

    Ok(())
}
