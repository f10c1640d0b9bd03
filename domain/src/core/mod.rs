//! Core domain concepts shared across the vote engine.
//!
//! - [`post_ref::PostRef`] — where a vote was cast (real post or seed placeholder)
//! - [`votee::Votee`] — what a vote points at (a player or "No Lynch")
//! - [`error`] — classified failures of resolution, replacement, and recovery

pub mod error;
pub mod post_ref;
pub mod votee;
