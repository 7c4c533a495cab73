//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - resolves data locations into a `DashboardConfig`
//! - loads the series and district map
//! - prints reports/plots
//! - writes optional exports

use std::fs::File;
use std::path::Path;

use clap::Parser;

use crate::chart::ChartSpec;
use crate::cli::{AdviceArgs, ChartArgs, Command, DataArgs, MapArgs, ReportArgs};
use crate::domain::{ChartKind, DashboardConfig, Source};
use crate::error::AppError;
use crate::map::MapLayout;
use crate::page::AdviceBoard;

pub mod pipeline;

const TUI_LOG_FILE: &str = "cvd.log";

/// Entry point for the `cvd` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` must be loaded before clap reads `env = ...` fallbacks.
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match &cli.command {
        Command::Tui(_) => crate::logging::init_file(Path::new(TUI_LOG_FILE))?,
        _ => crate::logging::init_stderr(),
    }

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Risk(args) => handle_risk(args),
        Command::Chart(args) => handle_chart(args),
        Command::Map(args) => handle_map(args),
        Command::Advice(args) => handle_advice(args),
        Command::Tui(args) => crate::tui::run(dashboard_config_from_args(&args)),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.data);
    let dashboard = pipeline::load_dashboard(&config)?;

    println!("{}", crate::report::format_dashboard(&dashboard));

    if args.plot {
        for kind in ChartKind::ALL {
            let style = crate::chart::ChartStyle::for_kind(kind);
            println!("{}", style.title(&config.region));
            println!(
                "{}",
                crate::plot::render_bar_chart(dashboard.series(kind), args.width, args.height)
            );
        }
    }

    if let Some(dir) = &args.export_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::new(2, format!("Failed to create export dir '{}': {e}", dir.display())))?;
        for kind in ChartKind::ALL {
            let series = dashboard.series(kind);
            let stem = format!("{}-{}", file_stem(&config.region), kind.file_suffix());
            crate::io::export::write_series_csv_file(&dir.join(format!("{stem}.csv")), series, "count")?;
            let spec = ChartSpec::for_kind(kind, &config.region, series);
            crate::io::export::write_chart_json(&dir.join(format!("{stem}.json")), &spec)?;
        }
        tracing::info!(dir = %dir.display(), "wrote exports");
    }

    Ok(())
}

fn handle_risk(args: DataArgs) -> Result<(), AppError> {
    let mut config = dashboard_config_from_args(&args);
    config.map = None;
    let dashboard = pipeline::load_dashboard(&config)?;

    print!("{}", crate::report::format_risk(&dashboard.infection_metrics()));
    print!(
        "{}",
        crate::report::format_occupancy(dashboard.occupancy(), config.bed_capacity)
    );
    Ok(())
}

fn handle_chart(args: ChartArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.data);
    let ingested = pipeline::load_one(&config, args.kind)?;
    let spec = ChartSpec::for_kind(args.kind, &config.region, &ingested.series);

    if args.json {
        let json = serde_json::to_string_pretty(&spec)
            .map_err(|e| AppError::new(2, format!("Failed to encode chart JSON: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", spec.options.title.text);
        print!(
            "{}",
            crate::plot::render_bar_chart(&ingested.series, args.width, args.height)
        );
        println!("{}", args.kind.caption(ingested.series.latest().value));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_chart_json(path, &spec)?;
    }
    Ok(())
}

fn handle_map(args: MapArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.data);
    let source = config
        .map
        .as_ref()
        .ok_or_else(|| AppError::new(2, "No district map found. Provide one with `cvd map --map <file.geojson>`."))?;

    let fetcher = crate::data::Fetcher::new()?;
    let map = crate::io::geojson::load_districts(&fetcher, source)?;
    print!("{}", crate::report::format_districts(&map));

    if let Some(path) = &args.export {
        let layout = MapLayout::new(config.mapbox_token.as_deref());
        let file = File::create(path)
            .map_err(|e| AppError::new(2, format!("Failed to create GeoJSON '{}': {e}", path.display())))?;
        crate::io::geojson::write_styled_geojson(file, &map, &layout)?;
    }
    Ok(())
}

fn handle_advice(args: AdviceArgs) -> Result<(), AppError> {
    let mut board = AdviceBoard::new();
    if board.select(&args.tier).is_none() {
        // Logged by the board; nothing else to show.
        return Ok(());
    }

    println!("{}", board.header());
    for line in board.visible_guidance() {
        println!("- {line}");
    }
    Ok(())
}

/// Resolve CLI/env data locations into a pipeline config.
pub fn dashboard_config_from_args(args: &DataArgs) -> DashboardConfig {
    let stem = file_stem(&args.region);
    let series_source = |explicit: &Option<String>, kind: ChartKind| match explicit {
        Some(raw) => Source::parse(raw),
        None => Source::resolve(&args.data_dir, &format!("{stem}-{}.csv", kind.file_suffix())),
    };

    let map = if args.no_map {
        None
    } else if let Some(raw) = &args.map {
        Some(Source::parse(raw))
    } else {
        default_map_source(&args.data_dir, &stem)
    };

    DashboardConfig {
        region: args.region.clone(),
        infected: series_source(&args.infected, ChartKind::Infected),
        deaths: series_source(&args.deaths, ChartKind::Deaths),
        hospitalised: series_source(&args.hospitalised, ChartKind::Hospitalised),
        map,
        bed_capacity: args.beds,
        mapbox_token: args.mapbox_token.clone(),
    }
}

/// The default map is optional: local files are only used when they exist.
fn default_map_source(data_dir: &str, stem: &str) -> Option<Source> {
    match Source::resolve(data_dir, &format!("{stem}-map.geojson")) {
        Source::Path(path) if !path.exists() => {
            tracing::debug!(path = %path.display(), "no default district map");
            None
        }
        source => Some(source),
    }
}

fn file_stem(region: &str) -> String {
    region.trim().to_lowercase().replace(' ', "-")
}

/// Rewrite argv so `cvd` defaults to `cvd tui`.
///
/// Rules:
/// - `cvd`                      -> `cvd tui`
/// - `cvd -r Gateshead ...`     -> `cvd tui -r Gateshead ...`
/// - `cvd --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["cvd"])), argv(&["cvd", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["cvd", "-r", "Gateshead"])),
            argv(&["cvd", "tui", "-r", "Gateshead"])
        );
        assert_eq!(rewrite_args(argv(&["cvd", "--help"])), argv(&["cvd", "--help"]));
        assert_eq!(rewrite_args(argv(&["cvd", "risk"])), argv(&["cvd", "risk"]));
    }

    #[test]
    fn default_sources_follow_region_name() {
        let cli = crate::cli::Cli::parse_from(["cvd", "risk", "--data-dir", "data", "-r", "North Tyneside", "--no-map"]);
        let Command::Risk(args) = cli.command else {
            panic!("expected risk command");
        };
        let cfg = dashboard_config_from_args(&args);

        assert_eq!(cfg.infected, Source::Path("data/north-tyneside-infected.csv".into()));
        assert_eq!(cfg.hospitalised, Source::Path("data/north-tyneside-hospitalised.csv".into()));
        assert_eq!(cfg.map, None);
    }

    #[test]
    fn url_base_and_overrides() {
        let cli = crate::cli::Cli::parse_from([
            "cvd",
            "report",
            "--data-dir",
            "https://example.org/data/",
            "--deaths",
            "local/deaths.csv",
            "--beds",
            "900",
        ]);
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        let cfg = dashboard_config_from_args(&args.data);

        assert_eq!(cfg.infected, Source::Url("https://example.org/data/newcastle-infected.csv".into()));
        assert_eq!(cfg.deaths, Source::Path("local/deaths.csv".into()));
        assert_eq!(cfg.map, Some(Source::Url("https://example.org/data/newcastle-map.geojson".into())));
        assert_eq!(cfg.bed_capacity, 900);
    }

    #[test]
    fn remote_data_dir_without_a_map_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let csv = |name: &str, text: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, text).unwrap();
            path.display().to_string()
        };
        let infected = csv("i.csv", "date,count\n2021-01-02,12\n2021-01-01,10\n");
        let deaths = csv("d.csv", "date,count\n2021-01-01,1\n");
        let hospitalised = csv("h.csv", "date,count\n2021-01-01,665\n");

        let cli = crate::cli::Cli::parse_from([
            "cvd",
            "report",
            "--data-dir",
            "http://127.0.0.1:9/data",
            "--infected",
            infected.as_str(),
            "--deaths",
            deaths.as_str(),
            "--hospitalised",
            hospitalised.as_str(),
        ]);
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        let cfg = dashboard_config_from_args(&args.data);
        assert_eq!(cfg.map, Some(Source::Url("http://127.0.0.1:9/data/newcastle-map.geojson".into())));

        let dashboard = pipeline::load_dashboard(&cfg).unwrap();
        assert!(dashboard.districts.is_none());
        assert!(matches!(dashboard.map_error, Some(crate::error::LoadError::Fetch { .. })));
        assert_eq!(dashboard.infection_metrics().latest, 12);
    }
}
