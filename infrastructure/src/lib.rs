//! Infrastructure layer for mafia-modtool
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the live forum client, the saved-page reader, the
//! HTML post extractor they share, and configuration file loading.

pub mod config;
pub mod forum;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDisplayConfig, FileForumConfig, FileGameConfig,
};
pub use forum::{client::ForumClient, file::FilePageSource};
