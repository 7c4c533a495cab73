//! Command-line parsing for the regional COVID-19 dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/metric code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ChartKind, DEFAULT_BED_CAPACITY};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cvd", version, about = "Regional COVID-19 dashboard (charts, risk level, bed availability, district map)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load every series and print latest figures, risk level and bed occupancy.
    Report(ReportArgs),
    /// Print risk level and bed occupancy only (useful for scripting).
    Risk(DataArgs),
    /// Render one chart in the terminal, or emit its chart payload as JSON.
    Chart(ChartArgs),
    /// Summarise the district map and optionally export styled GeoJSON.
    Map(MapArgs),
    /// Show the guidance for a restriction tier ("Tier 1", "Tier 2", "Tier 3", "National Lockdown").
    Advice(AdviceArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying load pipeline as `cvd report`, but renders
    /// results in a terminal UI using Ratatui.
    Tui(DataArgs),
}

/// Where the data lives and how to interpret it.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Directory or base URL holding `<region>-{infected,deaths,hospitalised}.csv`.
    #[arg(long, env = "CVD_DATA_DIR", default_value = ".")]
    pub data_dir: String,

    /// Region name used in titles and default file names.
    #[arg(short = 'r', long, env = "CVD_REGION", default_value = "Newcastle")]
    pub region: String,

    /// Override the infections CSV (path or URL).
    #[arg(long)]
    pub infected: Option<String>,

    /// Override the deaths CSV (path or URL).
    #[arg(long)]
    pub deaths: Option<String>,

    /// Override the hospital occupancy CSV (path or URL).
    #[arg(long)]
    pub hospitalised: Option<String>,

    /// District GeoJSON (path or URL). Defaults to `<region>-map.geojson` when present.
    #[arg(long)]
    pub map: Option<String>,

    /// Do not load the district map.
    #[arg(long, conflicts_with = "map")]
    pub no_map: bool,

    /// Number of hospital beds used for the occupancy percentage.
    #[arg(long, env = "CVD_BED_CAPACITY", default_value_t = DEFAULT_BED_CAPACITY)]
    pub beds: u32,

    /// Mapbox access token for the exported tile layer.
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true)]
    pub mapbox_token: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Render ASCII bar charts under the summary.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Write each series (CSV) and chart payload (JSON) into this directory.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Which chart to show.
    #[arg(short = 'k', long, value_enum, default_value_t = ChartKind::Infected)]
    pub kind: ChartKind,

    /// Print the chart payload as JSON instead of drawing it.
    #[arg(long)]
    pub json: bool,

    /// Write the chart payload JSON to a file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct MapArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Write the styled FeatureCollection to a file.
    #[arg(long, value_name = "GEOJSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct AdviceArgs {
    /// Tier label exactly as shown in the menu.
    pub tier: String,
}
