//! `covid-dashboard` library crate.
//!
//! The binary (`cvd`) is a thin wrapper around this library so that:
//!
//! - loading and metric logic is testable without spawning processes
//! - the CLI and the TUI share one load pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod map;
pub mod metrics;
pub mod page;
pub mod plot;
pub mod report;
pub mod tui;
