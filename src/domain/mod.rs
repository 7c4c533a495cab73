//! Domain types shared across ingest, metrics, charts, maps and reporting.
//!
//! This module should have minimal dependencies and no I/O.

pub mod types;

pub use types::*;
