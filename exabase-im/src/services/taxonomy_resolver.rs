//! Taxonomy resolution
//!
//! Ensures a taxonomy entry exists for a canonical name. New names are
//! resolved against GBIF; when GBIF cannot resolve (no strict match, or
//! the service is unreachable) a placeholder entry keyed by the name
//! itself is inserted for later manual reconciliation. External failure
//! is recoverable by design, unlike the strict local lookups.

use exabase_common::db::models::TaxonomyEntry;
use sqlx::SqlitePool;

use crate::db::taxonomy;
use crate::error::ImportResult;
use crate::services::gbif_client::{GbifClient, TaxonDetail};

/// Outcome of one ensure call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonResolution {
    /// Entry already present for this canonical name (or its usageKey)
    AlreadyPresent,
    /// New fully resolved entry inserted with this usageKey
    Resolved(String),
    /// New placeholder entry inserted, keyed by the canonical name
    Placeholder,
}

/// Make sure the taxonomy table has an entry for `canonical_name`.
///
/// Idempotent: a second call with the same name is a no-op.
pub async fn ensure_taxonomy_entry(
    pool: &SqlitePool,
    gbif: &GbifClient,
    canonical_name: &str,
) -> ImportResult<TaxonResolution> {
    if taxonomy::entry_exists_for_name(pool, canonical_name).await? {
        tracing::debug!(name = %canonical_name, "Taxonomy entry already present");
        return Ok(TaxonResolution::AlreadyPresent);
    }

    let usage_key = match gbif.match_name(canonical_name).await {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(name = %canonical_name, error = %e, "GBIF name match failed, creating placeholder");
            None
        }
    };

    match usage_key {
        Some(key) => {
            // A synonym may have resolved to an already-known usageKey
            if taxonomy::entry_exists_for_key(pool, &key).await? {
                tracing::info!(name = %canonical_name, usage_key = %key, "usageKey already present");
                return Ok(TaxonResolution::AlreadyPresent);
            }

            let detail = match gbif.species_detail(&key).await {
                Ok(detail) => detail,
                Err(e) => {
                    tracing::warn!(usage_key = %key, error = %e, "GBIF detail fetch failed, storing unresolved fields");
                    TaxonDetail::unresolved()
                }
            };

            let entry = TaxonomyEntry {
                usage_key: key.clone(),
                order: detail.order,
                family: detail.family,
                subfamily: String::new(),
                tribe: String::new(),
                genus: detail.genus,
                subgenus: String::new(),
                species: detail.species,
                // The local join key stays the name the rows carry, not
                // whatever GBIF canonicalized it to
                canonical_name: canonical_name.to_string(),
                authorship: detail.authorship,
                scientific_name: detail.scientific_name,
                rank: detail.rank,
                is_in_gbif: detail.is_in_gbif,
            };
            taxonomy::insert_entry(pool, &entry).await?;

            tracing::info!(name = %canonical_name, usage_key = %key, "Inserted resolved taxonomy entry");
            Ok(TaxonResolution::Resolved(key))
        }
        None => {
            let entry = TaxonomyEntry::placeholder(canonical_name);
            taxonomy::insert_entry(pool, &entry).await?;

            tracing::info!(name = %canonical_name, "Inserted placeholder taxonomy entry");
            Ok(TaxonResolution::Placeholder)
        }
    }
}
