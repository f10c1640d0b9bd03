//! Scan reporting and vote count formatting

pub mod bbcode;
pub mod console;
pub mod formatter;
