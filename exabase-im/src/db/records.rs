//! Specimen record operations
//!
//! A specimen record is keyed by the (usageKey, locality, eventDate,
//! institutionID) tuple; at most one record may exist per tuple.

use exabase_common::db::models::NewRecord;
use sqlx::{Row, SqlitePool};

use crate::error::{ImportError, ImportResult};

/// Find the specimen record for a linking key, if one exists.
///
/// More than one match violates the linking-key uniqueness invariant
/// and aborts the batch.
pub async fn find_linked_record(
    pool: &SqlitePool,
    usage_key: &str,
    locality: &str,
    event_date: &str,
    institution_id: &str,
) -> ImportResult<Option<i64>> {
    let rows = sqlx::query(
        r#"
        SELECT id FROM records
        WHERE usageKey = ? AND locality = ? AND eventDate = ? AND institutionID = ?
        "#,
    )
    .bind(usage_key)
    .bind(locality)
    .bind(event_date)
    .bind(institution_id)
    .fetch_all(pool)
    .await?;

    match rows.len() {
        0 => Ok(None),
        1 => Ok(Some(rows[0].get("id"))),
        _ => Err(ImportError::AmbiguousRecord(format!(
            "usageKey={} locality={} eventDate={} institutionID={}",
            usage_key, locality, event_date, institution_id
        ))),
    }
}

/// Insert a specimen record, returning its generated id
pub async fn insert_record(pool: &SqlitePool, record: &NewRecord) -> ImportResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO records (usageKey, identifiedBy, dateIdentified, identificationQualifier, typeStatus, num_m, num_f, num_nosex, num_mol, countryCode, stateProvince, locality, elevation, verbatimLatitude, verbatimLongitude, decimalLatitude, decimalLongitude, eventDate, recordedBy, biog_reg, institutionID, basisOfRecord, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.usage_key)
    .bind(&record.identified_by)
    .bind(&record.date_identified)
    .bind(&record.identification_qualifier)
    .bind(&record.type_status)
    .bind(record.num_m)
    .bind(record.num_f)
    .bind(record.num_nosex)
    .bind(record.num_mol)
    .bind(&record.country_code)
    .bind(&record.state_province)
    .bind(&record.locality)
    .bind(&record.elevation)
    .bind(&record.verbatim_latitude)
    .bind(&record.verbatim_longitude)
    .bind(&record.decimal_latitude)
    .bind(&record.decimal_longitude)
    .bind(&record.event_date)
    .bind(&record.recorded_by)
    .bind(&record.biog_reg)
    .bind(&record.institution_id)
    .bind(&record.basis_of_record)
    .bind(&record.notes)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
