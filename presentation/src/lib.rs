//! Presentation layer for mafia-modtool
//!
//! This crate contains CLI definitions, the console scan reporter,
//! and vote count formatters (BBCode, plain text, JSON).

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, TallyFormat};
pub use output::bbcode::BbcodeFormatter;
pub use output::console::{ConsoleReporter, Theme, disable_color};
pub use output::formatter::{deadline_hint, format_count};
