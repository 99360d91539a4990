//! Shared library for the Exabase importers
//!
//! Holds the pieces every import flow needs: the common error type,
//! configuration loading, database pool initialization with table
//! migrations, and the row models for the four Exabase tables.

pub mod config;
pub mod db;
pub mod error;

pub use crate::error::{Error, Result};
