//! Run a full discovery from the command line.

use super::Cli;
use crate::config::ScanConfig;
use crate::discovery::{discover, DiscoveryReport};
use crate::error::CliResult;
use crate::output;
use crate::scanner::{ProgressObserver, Prober, TracingObserver};
use std::io;
use std::sync::Arc;
use tracing::info;

impl Cli {
    /// Load the config, apply command-line overrides and validate the result.
    pub fn load_config(&self) -> CliResult<ScanConfig> {
        let mut config = ScanConfig::load(&self.config)?;

        if let Some(multiplier) = self.concurrency {
            config.concurrency_multiplier = multiplier;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config.validate()?;

        if config.filesd_path.is_some() {
            info!("filesdpath is ignored; results go to {}", self.output.display());
        }

        Ok(config)
    }

    /// Build the prober with the observers this invocation asked for.
    pub fn build_prober(&self, config: &ScanConfig) -> Prober {
        let prober = Prober::from_config(config).with_observer(Arc::new(TracingObserver));
        if self.show_progress() {
            prober.with_observer(Arc::new(ProgressObserver::new()))
        } else {
            prober
        }
    }

    /// Scan every configured network and write the target groups.
    pub async fn execute(&self) -> CliResult<DiscoveryReport> {
        let config = self.load_config()?;
        let prober = self.build_prober(&config);

        info!("Concurrency set to {}", prober.concurrency());
        match prober.timeout() {
            Some(limit) => info!("Connect timeout set to {:?}", limit),
            None => info!("No connect timeout, the OS default applies"),
        }

        let report = discover(&config, &prober).await;

        for skipped in &report.skipped {
            output::print_warning(&format!("skipping network: {}", skipped));
        }

        output::write_groups(&report.groups, &self.output, io::stdout().lock())?;

        let summary = output::summary_line(
            report.groups.len(),
            report.skipped.len(),
            report.target_count(),
            report.elapsed.as_secs_f64(),
        );
        info!("{}", summary);
        if !self.quiet {
            output::print_info(&summary);
        }

        Ok(report)
    }
}
