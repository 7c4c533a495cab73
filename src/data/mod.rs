//! Data acquisition.

pub mod source;

pub use source::Fetcher;
