//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the real main that:
//! - loads `.env` and parses CLI arguments
//! - initialises logging
//! - loads the data directory into a dashboard
//! - prints reports/plots or hands over to the TUI

use clap::Parser;
use tracing::info;

use crate::cli::{Command, CompareArgs, CorrArgs, ExportArgs, GlobalArgs, MapArgs, TrendArgs};
use crate::domain::{DashConfig, ExclusionSet, IndicatorKind, NormalizedTable};
use crate::error::AppError;

pub mod pipeline;

/// Global flags that consume the following argument as their value.
const GLOBAL_VALUE_FLAGS: [&str; 5] = ["--data-dir", "--exclude", "--log-level", "--width", "--height"];

/// Entry point for the `eudash` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` is optional; real environment variables win.
    let _ = dotenvy::dotenv();

    // `eudash` and `eudash --data-dir x` behave like `eudash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let tui = matches!(cli.command, Command::Tui);
    crate::logging::init(cli.global.log_level.as_deref(), tui);

    let config = dash_config_from_args(&cli.global);
    info!(
        data_dir = %config.data_dir.display(),
        exclusions = config.exclusions.len(),
        "starting"
    );

    match cli.command {
        Command::Summary => handle_summary(&config),
        Command::Map(args) => handle_map(&config, args),
        Command::Trend(args) => handle_trend(&config, args),
        Command::Corr(args) => handle_corr(&config, args),
        Command::Compare(args) => handle_compare(&config, args),
        Command::Export(args) => handle_export(&config, args),
        Command::Tui => crate::tui::run(config),
    }
}

fn handle_summary(config: &DashConfig) -> Result<(), AppError> {
    let loaded = pipeline::load(config)?;
    println!(
        "{}",
        crate::report::format_load_summary(&loaded.tables, &loaded.report)
    );
    if loaded.tables.is_empty() {
        return Err(AppError::new(
            3,
            format!("No export could be loaded from '{}'.", config.data_dir.display()),
        ));
    }
    Ok(())
}

fn handle_map(config: &DashConfig, args: MapArgs) -> Result<(), AppError> {
    let loaded = pipeline::load(config)?;
    let dash = &loaded.dashboard;
    let year = pipeline::resolve_year(args.year, &dash.union_years(&[args.indicator]))?;
    let view = dash.map(args.indicator, year)?;
    print!("{}", crate::report::format_map(&view, args.top));
    Ok(())
}

fn handle_trend(config: &DashConfig, args: TrendArgs) -> Result<(), AppError> {
    let loaded = pipeline::load(config)?;
    let view = loaded.dashboard.trend(args.indicator, &args.countries)?;

    let missing: Vec<&String> = args
        .countries
        .iter()
        .filter(|c| !view.series.iter().any(|s| &s.country == *c))
        .collect();
    for country in missing {
        eprintln!("No {} data for '{country}'.", args.indicator.title());
    }

    if !args.no_plot {
        println!(
            "{}",
            crate::plot::render_trend(&view, config.plot_width, config.plot_height)
        );
    }
    print!("{}", crate::report::format_trend_table(&view));
    Ok(())
}

fn handle_corr(config: &DashConfig, args: CorrArgs) -> Result<(), AppError> {
    let loaded = pipeline::load(config)?;
    let dash = &loaded.dashboard;
    let year = match args.year {
        Some(y) => y,
        None => pipeline::default_year(dash, &[args.x, args.y]).ok_or_else(|| {
            AppError::new(
                3,
                format!(
                    "{} and {} share no year with data.",
                    args.x.title(),
                    args.y.title()
                ),
            )
        })?,
    };
    let view = dash.correlation(args.x, args.y, year, args.region)?;

    println!("{}", crate::report::format_correlation(&view));
    if !args.no_plot {
        print!(
            "{}",
            crate::plot::render_scatter(&view, config.plot_width, config.plot_height)
        );
    }
    Ok(())
}

fn handle_compare(config: &DashConfig, args: CompareArgs) -> Result<(), AppError> {
    let loaded = pipeline::load(config)?;
    let dash = &loaded.dashboard;
    match args.indicator {
        Some(kind) => {
            let year = pipeline::resolve_year(args.year, &dash.union_years(&[kind]))?;
            let view = dash.compare(kind, year, &args.a, &args.b)?;
            print!("{}", crate::report::format_comparison(&view));
        }
        None => {
            let kinds = IndicatorKind::EDUCATION;
            let year = pipeline::resolve_year(args.year, &dash.union_years(&kinds))?;
            let profile = dash.compare_profile(&kinds, year, &args.a, &args.b)?;
            print!("{}", crate::report::format_comparison_profile(&profile));
        }
    }
    Ok(())
}

fn handle_export(config: &DashConfig, args: ExportArgs) -> Result<(), AppError> {
    crate::io::ensure_outside_source(&args.out, &config.data_dir)?;
    let loaded = pipeline::load(config)?;

    let selected = export_selection(&loaded, args.indicator, args.filtered)?;
    let n = crate::io::write_tables(&args.out, &selected, args.format)?;

    info!(path = %args.out.display(), rows = n, tables = selected.len(), "export written");
    println!("Wrote {n} row(s) from {} table(s) to {}", selected.len(), args.out.display());
    Ok(())
}

fn export_selection(
    loaded: &pipeline::LoadedData,
    indicator: Option<IndicatorKind>,
    filtered: bool,
) -> Result<Vec<&NormalizedTable>, AppError> {
    match (indicator, filtered) {
        (Some(kind), true) => loaded
            .dashboard
            .indicator(kind)
            .map(|t| vec![t])
            .ok_or_else(|| not_loaded(kind)),
        (Some(kind), false) => loaded
            .tables
            .get(kind.file_name())
            .map(|t| vec![t])
            .ok_or_else(|| not_loaded(kind)),
        (None, true) => Ok(loaded
            .dashboard
            .kinds()
            .filter_map(|k| loaded.dashboard.indicator(k))
            .collect()),
        (None, false) => Ok(loaded.tables.iter().collect()),
    }
}

fn not_loaded(kind: IndicatorKind) -> AppError {
    AppError::new(3, format!("{} was not loaded.", kind.file_name()))
}

/// Collapse global flags into the pipeline configuration.
pub fn dash_config_from_args(args: &GlobalArgs) -> DashConfig {
    let base = if args.keep_aggregates {
        ExclusionSet::none()
    } else {
        ExclusionSet::default()
    };
    let exclusions = args
        .exclude
        .iter()
        .fold(base, |set, label| set.with(label.trim()));

    DashConfig {
        data_dir: args.data_dir.clone(),
        exclusions,
        plot_width: args.width,
        plot_height: args.height,
    }
}

/// Rewrite argv so `eudash` defaults to `eudash tui`.
///
/// Rules:
/// - `eudash`                         -> `eudash tui`
/// - `eudash --data-dir d`            -> `eudash tui --data-dir d`
/// - `eudash --data-dir d map ...`    -> unchanged
/// - `eudash --data-dir map`          -> `eudash tui --data-dir map`
/// - `eudash --help/--version/-h`     -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version");
    if is_top_level_help_or_version {
        return argv;
    }

    match first_positional(&argv) {
        // Explicit subcommand, or something clap should reject itself.
        Some(_) => argv,
        // Only flags were given: treat them as TUI flags.
        None => {
            argv.insert(1, "tui".to_string());
            argv
        }
    }
}

/// Index of the first argument that is neither a global flag nor its value.
fn first_positional(argv: &[String]) -> Option<usize> {
    let mut idx = 1;
    while idx < argv.len() {
        let arg = argv[idx].as_str();
        if !arg.starts_with('-') {
            return Some(idx);
        }
        if GLOBAL_VALUE_FLAGS.contains(&arg) {
            idx += 1;
        }
        idx += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["eudash"])), args(&["eudash", "tui"]));
        assert_eq!(
            rewrite_args(args(&["eudash", "--data-dir", "d"])),
            args(&["eudash", "tui", "--data-dir", "d"])
        );
    }

    #[test]
    fn explicit_subcommands_are_left_alone() {
        let argv = args(&["eudash", "--data-dir", "d", "map", "-i", "neet"]);
        assert_eq!(rewrite_args(argv.clone()), argv);
        let help = args(&["eudash", "--help"]);
        assert_eq!(rewrite_args(help.clone()), help);
    }

    #[test]
    fn flag_values_named_like_subcommands_still_default_to_tui() {
        assert_eq!(
            rewrite_args(args(&["eudash", "--data-dir", "map"])),
            args(&["eudash", "tui", "--data-dir", "map"])
        );
        assert_eq!(
            rewrite_args(args(&["eudash", "--exclude", "summary", "--keep-aggregates"])),
            args(&["eudash", "tui", "--exclude", "summary", "--keep-aggregates"])
        );
        assert_eq!(
            rewrite_args(args(&["eudash", "--data-dir=trend"])),
            args(&["eudash", "tui", "--data-dir=trend"])
        );

        let argv = args(&["eudash", "--exclude", "map", "compare", "--a", "Malta", "--b", "Italy"]);
        assert_eq!(rewrite_args(argv.clone()), argv);

        let cli = crate::cli::Cli::parse_from(rewrite_args(args(&["eudash", "--data-dir", "map"])));
        assert!(matches!(cli.command, Command::Tui));
        assert_eq!(cli.global.data_dir, std::path::PathBuf::from("map"));
    }

    #[test]
    fn config_merges_exclusions() {
        let cli = crate::cli::Cli::parse_from(["eudash", "--exclude", " Kosovo ", "summary"]);
        let config = dash_config_from_args(&cli.global);
        assert_eq!(config.exclusions.len(), 4);
        assert!(config.exclusions.contains("Kosovo"));

        let cli = crate::cli::Cli::parse_from(["eudash", "--keep-aggregates", "summary"]);
        assert!(dash_config_from_args(&cli.global).exclusions.is_empty());
    }
}
