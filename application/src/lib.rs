//! Application layer for mafia-modtool
//!
//! This crate contains the scan use case and its port definitions. It
//! depends only on the domain layer: the forum client, saved-page reader,
//! and console reporting plug in from the outer layers.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    observer::{PostNote, ScanObserver, SilentObserver},
    page_source::{ForumPost, Page, PageSource, PageSourceError, PostLine, VoteAction},
};
pub use use_cases::scan_game::{ScanError, ScanGame, ScanOptions, ScanOutcome};
