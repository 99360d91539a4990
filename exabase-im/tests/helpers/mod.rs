//! Shared test helpers: in-memory database setup, CSV fixtures, and a
//! minimal HTTP stub for exercising the external-failure policy.

#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// In-memory SQLite pool with the importer tables created.
///
/// Single connection: each in-memory connection is its own database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    exabase_common::db::init_tables(&pool).await.unwrap();

    pool
}

/// Seed one taxonomy entry so strict lookups resolve
pub async fn seed_taxonomy(pool: &SqlitePool, usage_key: &str, canonical_name: &str) {
    sqlx::query(
        r#"
        INSERT INTO taxonomy (usageKey, "order", family, subfamily, tribe, genus, subgenus, species, canonicalName, authorship, scientificName, rank, isInGBIF)
        VALUES (?, '', '', '', '', '', '', '', ?, '', '', '', 1)
        "#,
    )
    .bind(usage_key)
    .bind(canonical_name)
    .execute(pool)
    .await
    .unwrap();
}

/// Write CSV lines to a file inside `dir`
pub fn write_csv(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// A collection-shape row (26 columns), with the interesting fields set
pub fn collection_line(
    collection_id: &str,
    genus: &str,
    species: &str,
    subspecies: &str,
    sex: &str,
    locality: &str,
    event_date: &str,
) -> String {
    let mut fields = vec![String::new(); 26];
    fields[0] = collection_id.to_string();
    fields[3] = genus.to_string();
    fields[4] = species.to_string();
    fields[5] = subspecies.to_string();
    fields[6] = sex.to_string();
    fields[7] = "IT".to_string();
    fields[8] = "Piemonte".to_string();
    fields[9] = "Cuneo".to_string();
    fields[10] = locality.to_string();
    fields[12] = event_date.to_string();
    fields[24] = "COI".to_string();
    fields.join(",")
}

/// A records-shape row (29 columns); species sits after the subgenus column
pub fn records_line(genus: &str, species: &str, subspecies: &str, locality: &str) -> String {
    let mut fields = vec![String::new(); 29];
    fields[3] = genus.to_string();
    fields[5] = species.to_string();
    fields[6] = subspecies.to_string();
    fields[13] = "IT".to_string();
    fields[14] = "Piemonte".to_string();
    fields[16] = locality.to_string();
    fields[24] = "2019-06-01".to_string();
    fields[25] = "coll. Test".to_string();
    fields[27] = "PreservedSpecimen".to_string();
    fields.join(",")
}

pub fn records_header() -> String {
    vec![""; 29].join(",")
}

/// A molecular-shape row (7 leading taxon columns)
pub fn molecular_line(collection_id: &str, genus: &str, species: &str, subspecies: &str) -> String {
    let mut fields = vec![String::new(); 8];
    fields[0] = collection_id.to_string();
    fields[3] = genus.to_string();
    fields[5] = species.to_string();
    fields[6] = subspecies.to_string();
    fields.join(",")
}

/// A canned 200 response carrying a JSON body
pub fn http_json_response(json: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        json.len(),
        json
    )
}

/// A canned 500 response with an empty body
pub fn http_500_response() -> String {
    "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
        .to_string()
}

/// Spawn a stub HTTP server that answers every request with 500.
///
/// Returns the base URL to point a GbifClient at.
pub async fn spawn_http_500_stub() -> String {
    let response = http_500_response();
    spawn_gbif_stub(response.clone(), response).await
}

/// Spawn a stub GBIF server with one canned response per endpoint:
/// `match_response` for `/species/match` requests, `detail_response`
/// for everything else under `/species/`.
///
/// Returns the base URL to point a GbifClient at.
pub async fn spawn_gbif_stub(match_response: String, detail_response: String) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let match_response = match_response.clone();
            let detail_response = detail_response.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);

                let response = if request.starts_with("GET /species/match") {
                    match_response
                } else {
                    detail_response
                };

                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Base URL nothing listens on (connection refused)
pub fn unreachable_base_url() -> String {
    "http://127.0.0.1:1".to_string()
}
