//! Collection phase
//!
//! For each collection row: find the specimen record matching the
//! (usageKey, locality, eventDate, institutionID) linking key, creating
//! one when absent, then attach a molecular sample (bumping the parent
//! record's counts) and a sequence row.

use std::path::Path;

use exabase_common::db::models::{MolecularSample, NewRecord};
use sqlx::SqlitePool;

use crate::db::{molecular, records, taxonomy};
use crate::error::ImportResult;
use crate::import::ImportSummary;
use crate::normalize::{canonical_name, compose_state_province};
use crate::schema::CollectionRow;

pub async fn run_collection_phase(
    pool: &SqlitePool,
    csv_path: &Path,
    institution_id: &str,
    summary: &mut ImportSummary,
) -> ImportResult<()> {
    let file = csv_path.display().to_string();
    tracing::info!(file = %file, institution = %institution_id, "Starting collection phase");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)?;

    for result in reader.records() {
        let record = result?;
        let row = CollectionRow::from_record(&record, &file)?;

        let name = canonical_name(&row.genus, &row.species, &row.subspecies);
        let usage_key = taxonomy::lookup_usage_key(pool, &name).await?;

        let linking_id = match records::find_linked_record(
            pool,
            &usage_key,
            &row.locality,
            &row.event_date,
            institution_id,
        )
        .await?
        {
            Some(id) => {
                tracing::debug!(id = id, collection_id = %row.collection_id, "Linked to existing record");
                summary.records_linked += 1;
                id
            }
            None => {
                let new_record = NewRecord {
                    usage_key: usage_key.clone(),
                    country_code: row.country_code.clone(),
                    state_province: compose_state_province(&row.state, &row.province),
                    locality: row.locality.clone(),
                    elevation: row.elevation.clone(),
                    verbatim_latitude: row.verbatim_latitude.clone(),
                    verbatim_longitude: row.verbatim_longitude.clone(),
                    decimal_latitude: row.decimal_latitude.clone(),
                    decimal_longitude: row.decimal_longitude.clone(),
                    event_date: row.event_date.clone(),
                    recorded_by: row.recorded_by.clone(),
                    biog_reg: row.biog_reg.clone(),
                    institution_id: institution_id.to_string(),
                    basis_of_record: "PreservedSpecimen".to_string(),
                    notes: row.notes.clone(),
                    ..NewRecord::default()
                };

                let id = records::insert_record(pool, &new_record).await?;
                tracing::debug!(id = id, collection_id = %row.collection_id, "Created specimen record");
                summary.records_created += 1;
                id
            }
        };

        let sample = MolecularSample {
            collection_id: row.collection_id.clone(),
            sex: row.sex.clone(),
            notes: String::new(),
            life_stage: row.life_stage.clone(),
            bodypart: row.bodypart.clone(),
            preservation: row.preservation.clone(),
            localisation: row.localisation.clone(),
        };
        molecular::insert_molecular(pool, &sample, linking_id).await?;
        molecular::insert_sequence(pool, &row.sequence_type, &row.collection_id).await?;

        summary.collection_rows += 1;
    }

    tracing::info!(
        rows = summary.collection_rows,
        created = summary.records_created,
        linked = summary.records_linked,
        "Collection phase complete"
    );

    Ok(())
}
