//! Binary entry point for timegaps.
//!
//! Accepts or rejects files and other items based on age-bucketed retention
//! rules, writes one of the two sets to stdout and optionally deletes or
//! moves it.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{ArgAction, Parser};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use timegaps::actions::Action;
use timegaps::cli::{self, FilterOptions, FilterOutcome, ItemMode};
use timegaps::config::TimegapsConfig;
use timegaps::input::{Separator, TimeSource, parse_reference_time};
use timegaps::observability::{self, LoggingConfig};
use timegaps::retention::RuleSet;
use tracing::{debug, error, warn};

/// Accept or reject files/items based on time categorization.
#[derive(Parser, Debug)]
#[command(name = "timegaps")]
#[command(author, version, about, long_about = None)]
#[command(after_long_help = cli::CLASSIFICATION_HELP)]
struct Cli {
    /// Filter rules of the form <category><maxcount>[,<category><maxcount>...],
    /// e.g. 'recent5,days12,months5'. Categories: recent, hours, days, weeks,
    /// months, years. Unspecified categories default to 0.
    #[arg(value_name = "RULES")]
    rules: RuleSet,

    /// Items to filter: paths by default, strings with --time-from-string.
    /// Must be omitted with --stdin.
    #[arg(value_name = "ITEM")]
    items: Vec<String>,

    /// Read items from stdin (newline separated unless --nullsep).
    #[arg(short, long)]
    stdin: bool,

    /// Use NUL instead of newline to separate input and output items.
    #[arg(short = '0', long)]
    nullsep: bool,

    /// Output (and act on) accepted items instead of rejected ones.
    #[arg(short, long)]
    accepted: bool,

    /// Reference time as Unix timestamp or RFC 3339 (default: now).
    #[arg(short = 't', long, value_name = "TIME", value_parser = parse_reference_time)]
    reference_time: Option<f64>,

    /// Parse item time from the path basename with strftime format FMT
    /// (local time) instead of using the modification time.
    #[arg(long, value_name = "FMT", conflicts_with = "time_from_string")]
    time_from_basename: Option<String>,

    /// Treat items as plain strings and parse their time with strftime
    /// format FMT (local time).
    #[arg(long, value_name = "FMT")]
    time_from_string: Option<String>,

    /// Use the modification time of symlink targets.
    #[arg(short = 'S', long)]
    follow_symlinks: bool,

    /// Delete the selected paths.
    #[arg(short, long, conflicts_with = "move_to")]
    delete: bool,

    /// Allow --delete to remove non-empty directories.
    #[arg(short, long, requires = "delete")]
    recursive_delete: bool,

    /// Move the selected paths into directory DIR.
    #[arg(short, long = "move", value_name = "DIR")]
    move_to: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(short, long, env = "TIMEGAPS_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(Some(&config.logging), cli.verbose);
    if let Err(e) = observability::init(&logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    debug!(?cli, "Parsed arguments");

    match run(cli, &config) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(outcome) => {
            if let Some(report) = outcome.action {
                warn!(summary = %report.summary(), "Some actions failed");
            }
            ExitCode::FAILURE
        },
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<TimegapsConfig> {
    match path {
        Some(path) => TimegapsConfig::load_from_file(path)
            .with_context(|| format!("cannot load config file '{}'", path.display())),
        None => TimegapsConfig::load_default().context("cannot load default config file"),
    }
}

fn run(cli: Cli, config: &TimegapsConfig) -> anyhow::Result<FilterOutcome> {
    let options = build_options(cli, config)?;
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    cli::execute(&options, stdin, &mut stdout).context("filtering failed")
}

fn build_options(cli: Cli, config: &TimegapsConfig) -> anyhow::Result<FilterOptions> {
    let mode = match (cli.time_from_string, cli.time_from_basename) {
        (Some(format), _) => ItemMode::Strings { format },
        (None, basename) => ItemMode::Paths {
            source: basename.map_or(TimeSource::ModificationTime, TimeSource::Basename),
            follow_symlinks: cli.follow_symlinks || config.follow_symlinks,
        },
    };

    let action = match (cli.delete, cli.move_to) {
        (true, _) => Some(Action::Delete {
            recursive: cli.recursive_delete,
        }),
        (false, Some(target)) => Some(Action::move_to(target).context("invalid --move target")?),
        (false, None) => None,
    };

    Ok(FilterOptions {
        rules: cli.rules,
        items: cli.items,
        stdin: cli.stdin,
        separator: Separator::from_nullsep(cli.nullsep || config.null_separator),
        accepted: cli.accepted,
        reference_time: cli.reference_time,
        mode,
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use timegaps::models::Category;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rules_are_parsed_by_clap() {
        let cli = Cli::try_parse_from(["timegaps", "hours12,days5", "a"]).expect("parse");
        assert_eq!(cli.rules.max_count(Category::Hours), 12);
        assert_eq!(cli.items, ["a"]);
        assert!(Cli::try_parse_from(["timegaps", "minutes5", "a"]).is_err());
    }

    #[test]
    fn test_conflicting_options() {
        assert!(Cli::try_parse_from(["timegaps", "days1", "a", "-d", "-m", "/tmp"]).is_err());
        assert!(
            Cli::try_parse_from([
                "timegaps",
                "days1",
                "a",
                "--time-from-basename",
                "%Y",
                "--time-from-string",
                "%Y",
            ])
            .is_err()
        );
        assert!(Cli::try_parse_from(["timegaps", "days1", "a", "-r"]).is_err());
    }

    #[test]
    fn test_build_options_merges_config() {
        let cli = Cli::try_parse_from(["timegaps", "days1", "-s", "-vv"]).expect("parse");
        assert_eq!(cli.verbose, 2);
        let config = TimegapsConfig {
            null_separator: true,
            follow_symlinks: true,
            ..TimegapsConfig::default()
        };
        let options = build_options(cli, &config).expect("options");
        assert_eq!(options.separator, Separator::Nul);
        assert_eq!(
            options.mode,
            ItemMode::Paths {
                source: TimeSource::ModificationTime,
                follow_symlinks: true,
            }
        );
        assert!(options.action.is_none());
    }

    #[test]
    fn test_build_options_string_mode_and_reference_time() {
        let cli = Cli::try_parse_from([
            "timegaps",
            "days1",
            "x",
            "--time-from-string",
            "%Y-%m-%d",
            "-t",
            "2024-01-01T00:00:00Z",
        ])
        .expect("parse");
        let options = build_options(cli, &TimegapsConfig::default()).expect("options");
        assert_eq!(
            options.mode,
            ItemMode::Strings {
                format: "%Y-%m-%d".to_string()
            }
        );
        assert_eq!(options.reference_time, Some(1_704_067_200.0));
    }
}
