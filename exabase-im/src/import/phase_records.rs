//! Records phase
//!
//! Imports specimen records from the records CSV. The first line of the
//! export is a header and is skipped. Every row's taxon name must
//! already resolve in the local taxonomy table; absence aborts the
//! batch.

use std::path::Path;

use exabase_common::db::models::NewRecord;
use sqlx::SqlitePool;

use crate::db::{records, taxonomy};
use crate::error::ImportResult;
use crate::import::ImportSummary;
use crate::normalize::{canonical_name, compose_locality, compose_state_province};
use crate::schema::RecordsRow;

pub async fn run_records_phase(
    pool: &SqlitePool,
    csv_path: &Path,
    summary: &mut ImportSummary,
) -> ImportResult<()> {
    let file = csv_path.display().to_string();
    tracing::info!(file = %file, "Starting records phase");

    // has_headers(true) drops the export's single header line
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(csv_path)?;

    for result in reader.records() {
        let record = result?;
        let row = RecordsRow::from_record(&record, &file)?;

        let name = canonical_name(&row.genus, &row.species, &row.subspecies);
        let usage_key = taxonomy::lookup_usage_key(pool, &name).await?;

        let new_record = NewRecord {
            usage_key,
            identified_by: row.identified_by,
            date_identified: String::new(),
            identification_qualifier: String::new(),
            type_status: row.type_status,
            num_m: row.num_m,
            num_f: row.num_f,
            num_nosex: row.num_nosex,
            num_mol: None,
            country_code: row.country_code,
            state_province: compose_state_province(&row.state, &row.province),
            locality: compose_locality(&row.locality, &row.locality_detail),
            elevation: row.elevation,
            verbatim_latitude: row.verbatim_latitude,
            verbatim_longitude: row.verbatim_longitude,
            decimal_latitude: row.decimal_latitude,
            decimal_longitude: row.decimal_longitude,
            event_date: row.event_date,
            recorded_by: row.recorded_by,
            biog_reg: row.biog_reg,
            institution_id: row.institution_id,
            basis_of_record: row.basis_of_record,
            notes: row.notes,
        };

        let id = records::insert_record(pool, &new_record).await?;
        tracing::debug!(id = id, name = %name, "Imported specimen record");

        summary.records_imported += 1;
    }

    tracing::info!(rows = summary.records_imported, "Records phase complete");

    Ok(())
}
