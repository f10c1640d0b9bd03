//! Configuration file loading for mafia-modtool
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./modtool.toml` or `./.modtool.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/modtool/config.toml`
//! 4. Fallback: `~/.config/modtool/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileDisplayConfig, FileForumConfig, FileGameConfig};
pub use loader::ConfigLoader;
