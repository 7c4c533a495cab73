//! Input/output helpers.
//!
//! - CSV series ingest + validation (`ingest`)
//! - series/chart exports (`export`)
//! - district GeoJSON read/write (`geojson`)

pub mod export;
pub mod geojson;
pub mod ingest;

pub use export::*;
pub use geojson::*;
pub use ingest::*;
