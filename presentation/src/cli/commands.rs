//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the final vote count
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TallyFormat {
    /// BBCode block, ready to post in the thread
    Bbcode,
    /// Plain text
    Plain,
    /// JSON output
    Json,
}

/// CLI arguments for mafia-modtool
#[derive(Parser, Debug)]
#[command(name = "modtool")]
#[command(
    author,
    version,
    about = "Parses out mod-relevant info such as @mod and VOTEs from a mafia game thread"
)]
#[command(long_about = r#"
Scans a phpBB mafia game thread for the lines a moderator cares about:
@mod questions, V/LA notices, replacements, and VOTE/UNVOTE lines.

With --votecount the tool also keeps a running tally. Votes are matched
to players fuzzily (abbreviations, prefixes, typos), state is seeded from
the moderator's most recent posted "Official Vote Count" block, and a
hammer prints the count on the spot.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./modtool.toml      Project-level config
3. ~/.config/modtool/config.toml   Global config

Example:
  modtool 'https://forum.example/viewtopic.php?f=53&t=12345'
  modtool --votecount -m ModGuy -d '2026-09-01 18:00' saved-thread.html
  modtool --votecount -b -o bbcode 'https://forum.example/viewtopic.php?t=12345'
"#)]
pub struct Cli {
    /// The url of the game thread to scan (or a saved page file)
    pub game: String,

    /// The post # to start from
    #[arg(short, long, default_value_t = 0)]
    pub start: u32,

    /// The post # to end at (inclusive)
    #[arg(short, long)]
    pub end: Option<u32>,

    /// Count votes
    #[arg(long)]
    pub votecount: bool,

    /// The deadline to display in the votecounter
    #[arg(short, long)]
    pub deadline: Option<String>,

    /// The username of the moderator
    #[arg(short, long)]
    pub modname: Option<String>,

    /// Include link to previous vote count
    #[arg(short, long)]
    pub backlink: bool,

    /// Format for the final vote count
    #[arg(short, long, value_enum, default_value = "bbcode")]
    pub output: TallyFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress per-post blocks and progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
