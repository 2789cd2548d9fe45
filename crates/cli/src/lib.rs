//! # Meterlink CLI
//!
//! `meterlink report` reads usage items from a JSON file and reports them
//! through the signed usage transport.

pub mod args;
pub mod logging;
pub mod report;

pub use args::{Cli, Command, ReportArgs};
pub use report::{exit_code, parse_items, run_report};
