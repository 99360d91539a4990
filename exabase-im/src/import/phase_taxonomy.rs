//! Taxonomy phase
//!
//! Walks the molecular CSV and makes sure every canonical name it
//! mentions has a taxonomy entry before the later phases run their
//! strict lookups.

use std::path::Path;

use sqlx::SqlitePool;

use crate::error::ImportResult;
use crate::import::ImportSummary;
use crate::normalize::canonical_name;
use crate::schema::MolecularRow;
use crate::services::{ensure_taxonomy_entry, GbifClient, TaxonResolution};

pub async fn run_taxonomy_phase(
    pool: &SqlitePool,
    gbif: &GbifClient,
    csv_path: &Path,
    summary: &mut ImportSummary,
) -> ImportResult<()> {
    let file = csv_path.display().to_string();
    tracing::info!(file = %file, "Starting taxonomy phase");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)?;

    for result in reader.records() {
        let record = result?;
        let row = MolecularRow::from_record(&record, &file)?;
        let name = canonical_name(&row.genus, &row.species, &row.subspecies);

        tracing::debug!(collection_id = %row.collection_id, name = %name, "Ensuring taxonomy entry");

        match ensure_taxonomy_entry(pool, gbif, &name).await? {
            TaxonResolution::Resolved(_) => summary.taxonomy_resolved += 1,
            TaxonResolution::Placeholder => summary.taxonomy_placeholders += 1,
            TaxonResolution::AlreadyPresent => {}
        }

        summary.taxonomy_rows += 1;
    }

    tracing::info!(
        rows = summary.taxonomy_rows,
        resolved = summary.taxonomy_resolved,
        placeholders = summary.taxonomy_placeholders,
        "Taxonomy phase complete"
    );

    Ok(())
}
