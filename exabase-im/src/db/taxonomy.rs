//! Taxonomy table operations

use exabase_common::db::models::TaxonomyEntry;
use sqlx::{Row, SqlitePool};

use crate::error::{ImportError, ImportResult};

/// Strict usageKey lookup by canonical name.
///
/// Zero matches means the taxonomy phase never saw this name and the
/// local data is incomplete; more than one violates the one-entry-per-
/// name invariant. Both abort the batch.
pub async fn lookup_usage_key(pool: &SqlitePool, canonical_name: &str) -> ImportResult<String> {
    let rows = sqlx::query("SELECT usageKey FROM taxonomy WHERE canonicalName = ?")
        .bind(canonical_name)
        .fetch_all(pool)
        .await?;

    match rows.len() {
        0 => Err(ImportError::TaxonomyNotFound(canonical_name.to_string())),
        1 => Ok(rows[0].get("usageKey")),
        _ => Err(ImportError::AmbiguousTaxonomy(canonical_name.to_string())),
    }
}

/// Whether any entry exists for a canonical name
pub async fn entry_exists_for_name(pool: &SqlitePool, canonical_name: &str) -> ImportResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM taxonomy WHERE canonicalName = ?")
        .bind(canonical_name)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Whether any entry exists for a usageKey (synonym check)
pub async fn entry_exists_for_key(pool: &SqlitePool, usage_key: &str) -> ImportResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM taxonomy WHERE usageKey = ?")
        .bind(usage_key)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Insert a taxonomy entry (resolved or placeholder)
pub async fn insert_entry(pool: &SqlitePool, entry: &TaxonomyEntry) -> ImportResult<()> {
    sqlx::query(
        r#"
        INSERT INTO taxonomy (usageKey, "order", family, subfamily, tribe, genus, subgenus, species, canonicalName, authorship, scientificName, rank, isInGBIF)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.usage_key)
    .bind(&entry.order)
    .bind(&entry.family)
    .bind(&entry.subfamily)
    .bind(&entry.tribe)
    .bind(&entry.genus)
    .bind(&entry.subgenus)
    .bind(&entry.species)
    .bind(&entry.canonical_name)
    .bind(&entry.authorship)
    .bind(&entry.scientific_name)
    .bind(&entry.rank)
    .bind(entry.is_in_gbif)
    .execute(pool)
    .await?;

    Ok(())
}
