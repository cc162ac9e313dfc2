//! Command-line interface for sdscout.
//!
//! Uses `clap` derive macros for declarative argument parsing.
//!
//! ```text
//! sdscout -c config.yml -f results.json
//! ```

mod scan;

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Discover reachable endpoints and write Prometheus file_sd target groups.
///
/// Every host of every configured network is probed with a TCP connect on
/// each configured port. Reachable endpoints are written as JSON to the
/// result file and to stdout.
#[derive(Parser, Debug)]
#[command(name = "sdscout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discover live host:port endpoints for Prometheus file_sd", long_about = None)]
pub struct Cli {
    /// Path to the YAML scan configuration
    #[arg(short = 'c', long = "config", value_name = "PATH", env = "SDSCOUT_CONFIG", default_value = "config.yml")]
    pub config: PathBuf,

    /// Path of the JSON result file
    #[arg(short = 'f', long = "output", value_name = "PATH", env = "SDSCOUT_OUTPUT", default_value = "results.json")]
    pub output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and hide the progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Override the concurrency multiplier from the config file
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Override the per-probe timeout in seconds (0 leaves it to the OS)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Default `tracing` filter directive for the chosen verbosity.
    ///
    /// `RUST_LOG` takes precedence when set.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Whether to draw a progress bar.
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sdscout"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.yml"));
        assert_eq!(cli.output, PathBuf::from("results.json"));
        assert_eq!(cli.log_filter(), "warn");
        assert!(cli.show_progress());
        assert!(cli.concurrency.is_none());
        assert!(cli.timeout.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "sdscout", "-c", "lab.yml", "-f", "out.json", "-vv", "-t", "3",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("lab.yml"));
        assert_eq!(cli.output, PathBuf::from("out.json"));
        assert_eq!(cli.log_filter(), "debug");
        assert_eq!(cli.timeout, Some(3));
    }

    #[test]
    fn test_quiet_hides_progress() {
        let cli = Cli::try_parse_from(["sdscout", "-q"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
        assert!(!cli.show_progress());

        let cli = Cli::try_parse_from(["sdscout", "--no-progress"]).unwrap();
        assert!(!cli.show_progress());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sdscout", "-q", "-v"]).is_err());
    }
}
