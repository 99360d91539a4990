//! Import orchestration
//!
//! The run is three sequential phases over the three CSV exports:
//!
//! 1. Taxonomy phase — molecular CSV; make sure every taxon name has a
//!    taxonomy entry (GBIF-resolved or placeholder).
//! 2. Records phase — records CSV; import specimen records with strict
//!    usageKey lookup.
//! 3. Collection phase — collection CSV; link or create specimen
//!    records, then attach molecular samples and sequences.
//!
//! Rows are processed one at a time to completion, external calls
//! included. A typed local-store error (not found / ambiguous) aborts
//! the whole batch; GBIF failures degrade to placeholders and the run
//! continues.

mod phase_collection;
mod phase_records;
mod phase_taxonomy;

pub use phase_collection::run_collection_phase;
pub use phase_records::run_records_phase;
pub use phase_taxonomy::run_taxonomy_phase;

use exabase_common::config::Config;
use sqlx::SqlitePool;

use crate::error::ImportResult;
use crate::services::GbifClient;

/// Counters accumulated over one import run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Molecular rows seen by the taxonomy phase
    pub taxonomy_rows: u64,
    /// New fully resolved taxonomy entries
    pub taxonomy_resolved: u64,
    /// New placeholder taxonomy entries
    pub taxonomy_placeholders: u64,
    /// Specimen records imported from the records CSV
    pub records_imported: u64,
    /// Collection rows processed
    pub collection_rows: u64,
    /// Specimen records created for collection rows with no match
    pub records_created: u64,
    /// Collection rows attached to an existing specimen record
    pub records_linked: u64,
}

/// Run the full import: taxonomy, records, then collection
pub async fn run(
    pool: &SqlitePool,
    gbif: &GbifClient,
    config: &Config,
) -> ImportResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    run_taxonomy_phase(pool, gbif, &config.molecular_csv, &mut summary).await?;
    run_records_phase(pool, &config.records_csv, &mut summary).await?;
    run_collection_phase(
        pool,
        &config.collection_csv,
        &config.institution_id,
        &mut summary,
    )
    .await?;

    tracing::info!(
        taxonomy_rows = summary.taxonomy_rows,
        taxonomy_resolved = summary.taxonomy_resolved,
        taxonomy_placeholders = summary.taxonomy_placeholders,
        records_imported = summary.records_imported,
        collection_rows = summary.collection_rows,
        records_created = summary.records_created,
        records_linked = summary.records_linked,
        "Import run complete"
    );

    Ok(summary)
}
