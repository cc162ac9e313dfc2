//! Built-in probe observers.

use crate::scanner::traits::{ProbeObserver, ProbeOutcome, Progress};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use tracing::{debug, info};

/// Diagnostic sink that reports every outcome through `tracing`.
///
/// Reachable endpoints are logged at `info`, failures at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProbeObserver for TracingObserver {
    fn on_start(&self, total: usize) {
        debug!(total, "starting probe batch");
    }

    fn on_probe(&self, outcome: &ProbeOutcome, progress: Progress) {
        match &outcome.result {
            Ok(()) => info!(
                endpoint = %outcome.endpoint,
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "Connected to {}",
                outcome.endpoint
            ),
            Err(e) => debug!(
                endpoint = %outcome.endpoint,
                completed = progress.completed,
                total = progress.total,
                "Can not connect to {}: {}",
                outcome.endpoint,
                e
            ),
        }
    }

    fn on_finish(&self, reachable: usize) {
        debug!(reachable, "probe batch finished");
    }
}

/// Terminal progress bar over the probes of one batch.
///
/// A fresh bar is drawn for each batch. Output goes to stderr and is hidden
/// automatically when stderr is not a terminal.
#[derive(Default)]
pub struct ProgressObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                f(bar);
            }
        }
    }
}

impl ProbeObserver for ProgressObserver {
    fn on_start(&self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            bar.set_style(style.progress_chars("=>-"));
        }

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_probe(&self, outcome: &ProbeOutcome, _progress: Progress) {
        self.with_bar(|bar| {
            bar.inc(1);
            if outcome.is_reachable() {
                bar.set_message(format!("Found {}", outcome.endpoint));
            }
        });
    }

    fn on_finish(&self, reachable: usize) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_with_message(format!("{} reachable", reachable));
            }
        }
    }
}
