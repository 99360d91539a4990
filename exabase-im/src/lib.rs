//! exabase-im - Exabase CSV importer
//!
//! Loads specimen collection, records and molecular CSV exports into the
//! Exabase SQLite database. Taxon names are resolved against the local
//! `taxonomy` table, falling back to the GBIF species API (or a
//! placeholder entry) for names not yet known locally.
//!
//! The import runs as three sequential phases (see [`import`]):
//! taxonomy enrichment, records import, collection import.

pub mod db;
pub mod error;
pub mod import;
pub mod normalize;
pub mod schema;
pub mod services;

pub use crate::error::{ImportError, ImportResult};
