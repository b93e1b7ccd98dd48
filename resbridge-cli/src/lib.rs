//! CLI library for testing purposes

pub mod config;
pub mod report;

pub use config::{OptionArgs, load_options, parse_options};
pub use report::{OutputFormat, render_conversion, render_summary};
