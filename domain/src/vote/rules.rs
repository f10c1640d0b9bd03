//! Tunable matching and tally thresholds

use serde::{Deserialize, Serialize};

/// Knobs of the vote-resolution engine.
///
/// The defaults are the values the tool has always run with, tuned on real
/// games; none of them is sacred. All of them can be overridden from the
/// `[rules]` table of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Minimum similarity for a roster member to be considered at all.
    pub score_cutoff: f64,
    /// Candidates closer together than this are indistinguishable; the
    /// nomination is rejected as ambiguous instead of guessed at.
    pub ambiguity_margin: f64,
    /// Flag a wagon with "(L-k)" once it reaches this fraction of majority.
    pub lynch_warning_ratio: f64,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            score_cutoff: 60.0,
            ambiguity_margin: 5.0,
            lynch_warning_ratio: 0.6,
        }
    }
}
