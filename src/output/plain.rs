//! Human-facing status lines.
//!
//! Everything here goes to stderr so stdout stays a clean JSON document.

use console::style;

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    eprintln!("{} {}", style("ℹ").blue().bold(), msg);
}

/// One-line summary of a finished run.
pub fn summary_line(groups: usize, skipped: usize, targets: usize, secs: f64) -> String {
    let mut line = format!(
        "{} reachable endpoint{} across {} network{} in {:.2}s",
        targets,
        if targets == 1 { "" } else { "s" },
        groups,
        if groups == 1 { "" } else { "s" },
        secs
    );
    if skipped > 0 {
        line.push_str(&format!(" ({} skipped)", skipped));
    }
    line
}
