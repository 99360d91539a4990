//! Error types for exabase-im
//!
//! Two failure classes are deliberately kept apart:
//!
//! - Local-store absence or ambiguity ([`ImportError::TaxonomyNotFound`],
//!   [`ImportError::AmbiguousTaxonomy`], [`ImportError::AmbiguousRecord`])
//!   means the local data is inconsistent. These abort the batch: the
//!   orchestrator returns them up to `main`, which exits non-zero.
//! - External-service failure (GBIF unreachable or non-2xx) never carries
//!   this type; the taxonomy resolver degrades to a placeholder entry and
//!   the run continues. See `services::gbif_client::GbifError`.

use thiserror::Error;

/// Importer error type
#[derive(Debug, Error)]
pub enum ImportError {
    /// No taxonomy entry for a canonical name the strict lookup requires
    #[error("no usageKey found in taxonomy for '{0}'")]
    TaxonomyNotFound(String),

    /// More than one taxonomy entry matched a canonical name
    #[error("more than one taxonomy entry found for '{0}'")]
    AmbiguousTaxonomy(String),

    /// More than one specimen record matched a linking key
    #[error("more than one record found for {0}")]
    AmbiguousRecord(String),

    /// CSV row did not match the declared column schema
    #[error("{file}: row {row} has {found} columns, schema '{schema}' expects {expected}")]
    SchemaMismatch {
        file: String,
        schema: &'static str,
        row: u64,
        expected: usize,
        found: usize,
    },

    /// Database operation error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// CSV read/parse error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// exabase-common error
    #[error("common error: {0}")]
    Common(#[from] exabase_common::Error),
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
