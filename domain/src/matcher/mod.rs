//! Fuzzy name matching
//!
//! Forum players nominate each other with typos, nicknames, initials and
//! half-remembered capitalization. No single similarity metric covers all of
//! that, so the scorer is an ensemble: each heuristic produces its own score
//! and the strongest signal wins outright. One metric firing strongly is
//! sufficient evidence, and averaging would only dilute it.
//!
//! | Signal | Score |
//! |--------|-------|
//! | Exact match (case/punctuation-insensitive) | 100 |
//! | Abbreviation / acronym match | up to 95 |
//! | Strict prefix or suffix | 90 |
//! | Levenshtein ratio over the full strings | 0-100 |
//! | Best-window substring ratio | 0-85 |
//! | First-word substring ratio | 0-75 |

mod abbrev;
mod score;

pub use abbrev::abbreviation_score;
pub use score::{normalize_name, similarity};
