//! Database operations for the import flows
//!
//! All queries are parameterized and take the pool explicitly. Strict
//! lookups (taxonomy by canonical name, record by linking key) return
//! typed errors on absence or ambiguity; the orchestrator treats those
//! as batch-fatal.

pub mod molecular;
pub mod records;
pub mod taxonomy;
