//! Nomination resolution
//!
//! Turns one piece of free text into exactly one canonical roster name, or
//! refuses with a classified error. Quietly taking the best fuzzy match
//! would be dangerous when two names sit nearly equidistant from the typed
//! text, so near-ties are escalated as [`ResolveError::Ambiguous`] instead
//! of guessed at.

use std::cmp::Ordering;

use crate::core::error::ResolveError;
use crate::core::votee::Votee;
use crate::matcher::similarity;

use super::rules::MatchRules;

/// Resolve `raw` against the roster.
///
/// - fewer than two characters is never a valid nomination
/// - the literal "no lynch" (any case) is the reserved sentinel and skips
///   scoring entirely, whatever the roster holds
/// - an exact case-insensitive roster match wins outright, even with a
///   near-identical name right next to it
/// - otherwise the best-scoring member wins, unless the runner-up is
///   within `rules.ambiguity_margin` points
///
/// # Example
///
/// ```
/// use modtool_domain::{MatchRules, Votee, resolve};
///
/// let roster = vec!["Papa Zito".to_string(), "Beefster".to_string()];
/// let rules = MatchRules::default();
/// assert_eq!(
///     resolve("zito", &roster, &rules),
///     Ok(Votee::player("Papa Zito"))
/// );
/// assert_eq!(resolve("no lynch", &roster, &rules), Ok(Votee::NoLynch));
/// ```
pub fn resolve(raw: &str, roster: &[String], rules: &MatchRules) -> Result<Votee, ResolveError> {
    if raw.chars().count() < 2 {
        return Err(ResolveError::Invalid(raw.to_string()));
    }
    if raw.to_lowercase() == "no lynch" {
        return Ok(Votee::NoLynch);
    }

    let mut scored: Vec<(&String, f64)> = roster
        .iter()
        .map(|name| (name, similarity(raw, name)))
        .filter(|(_, score)| *score >= rules.score_cutoff)
        .collect();
    // Stable sort: equal scores keep roster order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let Some(&(best, best_score)) = scored.first() else {
        return Err(ResolveError::NoMatch(raw.to_string()));
    };

    // An exact hit is never ambiguous, no matter how close its neighbors.
    if raw.to_lowercase() != best.to_lowercase() {
        if let Some(&(runner_up, score)) = scored.get(1) {
            if (best_score - score).abs() < rules.ambiguity_margin {
                return Err(ResolveError::Ambiguous {
                    raw: raw.to_string(),
                    candidates: (best.clone(), runner_up.clone()),
                });
            }
        }
    }

    Ok(Votee::Player(best.clone()))
}
