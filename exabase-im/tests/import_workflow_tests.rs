//! End-to-end import runs over temp CSV fixtures and an in-memory
//! database, with GBIF unreachable so taxonomy resolution exercises the
//! placeholder path.

mod helpers;

use exabase_common::config::Config;
use exabase_im::import;
use exabase_im::services::GbifClient;
use exabase_im::ImportError;
use sqlx::Row;
use std::path::PathBuf;

fn test_config(
    dir: &tempfile::TempDir,
    collection: PathBuf,
    records: PathBuf,
    molecular: PathBuf,
) -> Config {
    Config {
        database_path: dir.path().join("unused.db"),
        collection_csv: collection,
        records_csv: records,
        molecular_csv: molecular,
        gbif_base_url: helpers::unreachable_base_url(),
        institution_id: "coll. Test".to_string(),
    }
}

#[tokio::test]
async fn full_run_links_collection_rows_through_placeholder_taxonomy() {
    let pool = helpers::memory_pool().await;
    let dir = tempfile::tempdir().unwrap();

    // Molecular rows introduce the two taxon names
    let molecular = helpers::write_csv(
        dir.path(),
        "molecular.csv",
        &[
            helpers::molecular_line("EX001", "Vulpes", "vulpes", ""),
            helpers::molecular_line("EX002", "Vulpes", "vulpes", ""),
            helpers::molecular_line("EX003", "Talpa", "caeca", "NA"),
        ],
    );

    // One specimen record from the records export
    let records = helpers::write_csv(
        dir.path(),
        "records.csv",
        &[
            helpers::records_header(),
            helpers::records_line("Vulpes", "vulpes", "", "Altrove"),
        ],
    );

    // Three collection rows; the first two share the linking key
    let collection = helpers::write_csv(
        dir.path(),
        "collection.csv",
        &[
            helpers::collection_line("EX001", "Vulpes", "vulpes", "", "f", "Val Maira", "2019-06-01"),
            helpers::collection_line("EX002", "Vulpes", "vulpes", "", "x", "Val Maira", "2019-06-01"),
            helpers::collection_line("EX003", "Talpa", "caeca", "", "m", "Val Grana", "2019-07-15"),
        ],
    );

    let config = test_config(&dir, collection, records, molecular);
    let gbif = GbifClient::new(config.gbif_base_url.clone()).unwrap();

    let summary = import::run(&pool, &gbif, &config).await.unwrap();

    assert_eq!(summary.taxonomy_rows, 3);
    assert_eq!(summary.taxonomy_placeholders, 2); // second Vulpes row is a no-op
    assert_eq!(summary.taxonomy_resolved, 0);
    assert_eq!(summary.records_imported, 1);
    assert_eq!(summary.collection_rows, 3);
    assert_eq!(summary.records_created, 2);
    assert_eq!(summary.records_linked, 1);

    // 1 from the records phase + 2 created by the collection phase
    let record_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM records")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(record_count, 3);

    // The shared-key record got both molecular rows and its counts
    let row = sqlx::query(
        r#"
        SELECT id, num_f, num_nosex, num_mol FROM records
        WHERE locality = 'Val Maira' AND eventDate = '2019-06-01'
        "#,
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(row.get::<i64, _>("num_f"), 1);
    assert_eq!(row.get::<i64, _>("num_nosex"), 1); // sex code "x" -> no-sex bucket
    assert_eq!(row.get::<i64, _>("num_mol"), 2);

    let linked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM molecular WHERE linking_id = ?")
        .bind(row.get::<i64, _>("id"))
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(linked, 2);

    // One sequence per collection row, accession blank
    let sequences: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sequences WHERE accession = ''")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(sequences, 3);

    // Placeholder taxonomy entries are keyed by the canonical name
    let usage_key: String =
        sqlx::query_scalar("SELECT usageKey FROM taxonomy WHERE canonicalName = 'Vulpes vulpes'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(usage_key, "Vulpes vulpes");
}

#[tokio::test]
async fn rerunning_taxonomy_phase_creates_no_duplicates() {
    let pool = helpers::memory_pool().await;
    let dir = tempfile::tempdir().unwrap();

    let molecular = helpers::write_csv(
        dir.path(),
        "molecular.csv",
        &[helpers::molecular_line("EX001", "Vulpes", "vulpes", "")],
    );
    let gbif = GbifClient::new(helpers::unreachable_base_url()).unwrap();

    let mut first = import::ImportSummary::default();
    import::run_taxonomy_phase(&pool, &gbif, &molecular, &mut first)
        .await
        .unwrap();
    let mut second = import::ImportSummary::default();
    import::run_taxonomy_phase(&pool, &gbif, &molecular, &mut second)
        .await
        .unwrap();

    assert_eq!(first.taxonomy_placeholders, 1);
    assert_eq!(second.taxonomy_placeholders, 0);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM taxonomy")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn unknown_taxon_in_collection_aborts_the_batch() {
    let pool = helpers::memory_pool().await;
    let dir = tempfile::tempdir().unwrap();

    let molecular = helpers::write_csv(dir.path(), "molecular.csv", &[]);
    let records = helpers::write_csv(dir.path(), "records.csv", &[helpers::records_header()]);
    let collection = helpers::write_csv(
        dir.path(),
        "collection.csv",
        &[helpers::collection_line("EX001", "Vulpes", "vulpes", "", "f", "Val Maira", "2019-06-01")],
    );

    let config = test_config(&dir, collection, records, molecular);
    let gbif = GbifClient::new(config.gbif_base_url.clone()).unwrap();

    let err = import::run(&pool, &gbif, &config).await.unwrap_err();
    match err {
        ImportError::TaxonomyNotFound(name) => assert_eq!(name, "Vulpes vulpes"),
        other => panic!("expected TaxonomyNotFound, got {:?}", other),
    }

    // Nothing was attached for the failed row
    let molecular_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM molecular")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(molecular_rows, 0);
}

#[tokio::test]
async fn malformed_collection_row_fails_with_schema_mismatch() {
    let pool = helpers::memory_pool().await;
    let dir = tempfile::tempdir().unwrap();

    let collection = helpers::write_csv(
        dir.path(),
        "collection.csv",
        &["EX001,Vulpes,vulpes".to_string()],
    );

    let mut summary = import::ImportSummary::default();
    let err = import::run_collection_phase(&pool, &collection, "coll. Test", &mut summary)
        .await
        .unwrap_err();

    match err {
        ImportError::SchemaMismatch {
            schema,
            expected,
            found,
            ..
        } => {
            assert_eq!(schema, "collection");
            assert_eq!(expected, 26);
            assert_eq!(found, 3);
        }
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
}
