//! Molecular sample and sequence operations
//!
//! Both tables are append-only. Attaching a molecular sample also bumps
//! the parent record's aggregate counts: exactly one sex bucket plus
//! num_mol, with `COALESCE(col, 0) + 1` so NULL counts start at zero.

use exabase_common::db::models::MolecularSample;
use sqlx::SqlitePool;

use crate::error::ImportResult;

/// Insert a molecular sample and update the parent record's counts.
///
/// Sex classification: "f" -> num_f, "m" -> num_m, anything else ->
/// num_nosex. num_mol is incremented for every sample.
pub async fn insert_molecular(
    pool: &SqlitePool,
    sample: &MolecularSample,
    linking_id: i64,
) -> ImportResult<()> {
    sqlx::query(
        r#"
        INSERT INTO molecular (collection_id, linking_id, sex, notes, lifeStage, bodypart, preservation, localisation)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&sample.collection_id)
    .bind(linking_id)
    .bind(&sample.sex)
    .bind(&sample.notes)
    .bind(&sample.life_stage)
    .bind(&sample.bodypart)
    .bind(&sample.preservation)
    .bind(&sample.localisation)
    .execute(pool)
    .await?;

    let update_query = match sample.sex.as_str() {
        "f" => {
            "UPDATE records SET num_f = COALESCE(num_f, 0) + 1, num_mol = COALESCE(num_mol, 0) + 1 WHERE id = ?"
        }
        "m" => {
            "UPDATE records SET num_m = COALESCE(num_m, 0) + 1, num_mol = COALESCE(num_mol, 0) + 1 WHERE id = ?"
        }
        _ => {
            "UPDATE records SET num_nosex = COALESCE(num_nosex, 0) + 1, num_mol = COALESCE(num_mol, 0) + 1 WHERE id = ?"
        }
    };

    sqlx::query(update_query)
        .bind(linking_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Insert a sequence row for a collection identifier.
///
/// The accession is left blank; a separate curation process fills it.
pub async fn insert_sequence(
    pool: &SqlitePool,
    seq_type: &str,
    collection_id: &str,
) -> ImportResult<()> {
    sqlx::query("INSERT INTO sequences (type, accession, collection_id) VALUES (?, '', ?)")
        .bind(seq_type)
        .bind(collection_id)
        .execute(pool)
        .await?;

    Ok(())
}
