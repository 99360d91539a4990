//! Import services

pub mod gbif_client;
pub mod taxonomy_resolver;

pub use gbif_client::{GbifClient, GbifError, TaxonDetail};
pub use taxonomy_resolver::{ensure_taxonomy_entry, TaxonResolution};
