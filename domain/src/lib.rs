//! Domain layer for mafia-modtool
//!
//! This crate contains the vote-resolution engine: pure state and logic with
//! no I/O. It knows nothing about forums, HTML, or terminals.
//!
//! # Core Concepts
//!
//! ## Wagon
//!
//! Every tracked player has at most one standing vote. The voters currently
//! piled onto the same target form that target's *wagon*.
//!
//! ## Hammer
//!
//! The vote that pushes a wagon past strict majority. Once it lands the day
//! is effectively over and a fresh vote count should be posted.
//!
//! ## Fuzzy nominations
//!
//! Players rarely type each other's names exactly. The [`matcher`] module
//! scores free-text nominations against the player list, and [`vote::resolve`]
//! turns those scores into a single canonical name or a classified refusal.

pub mod core;
pub mod matcher;
pub mod vote;

// Re-export commonly used types
pub use core::{
    error::{ReplaceError, ResolveError, TallyError},
    post_ref::PostRef,
    votee::Votee,
};
pub use matcher::similarity;
pub use vote::{
    ledger::{VoteEntry, VoteEvent, VoteLedger},
    resolve::resolve,
    rules::MatchRules,
    tally::{
        RecoveredCount, TallyRow, VoteCount, WagonLine, WagonStatus, parse_block, render, wagons,
    },
};
