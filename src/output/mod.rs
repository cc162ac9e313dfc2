//! Output module.
//!
//! Target group aggregation, the JSON document handed to Prometheus, and the
//! status lines printed around it.

mod json_format;
mod plain;
mod target_group;

pub use json_format::{to_json, write_groups};
pub use plain::{print_error, print_info, print_warning, summary_line};
pub use target_group::{TargetGroup, TargetLabels};
