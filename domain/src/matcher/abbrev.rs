//! Abbreviation scoring
//!
//! Scores how well a short alphanumeric string stands for a full username:
//! "nm" for "Not_Mafia", "nsg" for "northsidegal", "a50" for "Almost50".
//! The score is a product of per-character step weights, so initials and
//! camel-case acronyms score a clean 1.0 while sloppier in-word subsequence
//! matches decay below it.

/// Weight of a matched character that does not sit on a word boundary.
const INTERIOR_WEIGHT: f64 = 0.85;

/// Penalty when the match resumes at the second character but the first
/// letter is not a word on its own ("a" and "i" are).
const TIGHT_PREFIX_PENALTY: f64 = 0.8;

/// Longest candidate still treated as an abbreviation. Anything longer is
/// a name in its own right and belongs to the edit-distance metrics.
const MAX_ABBREV_LEN: usize = 4;

/// Score `abbr` as an abbreviation of `full`, in `[0.0, 1.0]`.
///
/// `abbr` is expected in normalized form (lowercase alphanumerics); `full`
/// keeps its original text so capital letters can mark word starts.
///
/// The first characters must agree. A trailing all-digit suffix matches
/// only if the full name ends with the same digits ("a50" ~ "Almost50").
/// Every other character must occur in order; each step weighs 1.0 when it
/// lands on a capital letter or just after a non-letter, and
/// [`INTERIOR_WEIGHT`] otherwise. The best-weighted path wins.
pub fn abbreviation_score(abbr: &str, full: &str) -> f64 {
    let abbr: Vec<char> = abbr.chars().collect();
    if abbr.is_empty() || abbr.len() > MAX_ABBREV_LEN {
        return 0.0;
    }
    let full: Vec<char> = full.chars().collect();
    let full_lower: Vec<char> = full
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    best_path(&abbr, &full, &full_lower)
}

/// Match `abbr[0]` at the head of `full`, then try every position for the
/// next character and keep the best-weighted continuation.
fn best_path(abbr: &[char], full: &[char], full_lower: &[char]) -> f64 {
    if abbr.len() > full.len() {
        return 0.0;
    }
    if full_lower.first() != Some(&abbr[0]) {
        return 0.0;
    }
    if abbr.len() == 1 {
        return 1.0;
    }
    // Numeric tails anchor to the end: "g27" wants "Goron27", not a 2 and
    // a 7 scattered through the name.
    if abbr[1..].iter().all(|c| c.is_ascii_digit()) {
        return if full.ends_with(&abbr[1..]) { 1.0 } else { 0.0 };
    }

    let next = abbr[1];
    let mut best = 0.0_f64;
    for cut in 1..=(full.len() - abbr.len() + 1) {
        if full_lower[cut] != next {
            continue;
        }
        let boundary = full[cut].is_uppercase() || !full[cut - 1].is_alphabetic();
        let weight = if boundary { 1.0 } else { INTERIOR_WEIGHT };
        let mut score = weight * best_path(&abbr[1..], &full[cut..], &full_lower[cut..]);
        if cut == 1 && full_lower[0] != 'a' && full_lower[0] != 'i' {
            score *= TIGHT_PREFIX_PENALTY;
        }
        if score > best {
            best = score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_score_full() {
        // Each step lands on an underscore-separated word start.
        assert_eq!(abbreviation_score("nm", "Not_Mafia"), 1.0);
    }

    #[test]
    fn test_camel_case_acronym_scores_full() {
        assert_eq!(abbreviation_score("rc", "RadiantCowbells"), 1.0);
        assert_eq!(abbreviation_score("pz", "Papa Zito"), 1.0);
    }

    #[test]
    fn test_numeric_tail_must_anchor_to_the_end() {
        assert_eq!(abbreviation_score("a50", "Almost50"), 1.0);
        assert_eq!(abbreviation_score("g27", "Goron27"), 1.0);
        assert_eq!(abbreviation_score("a51", "Almost50"), 0.0);
    }

    #[test]
    fn test_interior_matches_decay() {
        // "northsidegal" has no capitals or separators, so every step after
        // the first is an interior match.
        let score = abbreviation_score("nsg", "northsidegal");
        assert!(score > 0.6 && score < 1.0, "got {}", score);
    }

    #[test]
    fn test_tight_prefix_penalty() {
        // "bo" consumes "B" then the immediately following "o"; "b" is not
        // a standalone word, so the path is penalized.
        let score = abbreviation_score("bo", "Bob");
        assert!(score > 0.6 && score < 0.7, "got {}", score);
        // "ad" out of "Adam" starts with a word on its own and is spared.
        let spared = abbreviation_score("ad", "Adam");
        assert!(spared > score, "got {} vs {}", spared, score);
    }

    #[test]
    fn test_first_characters_must_agree() {
        assert_eq!(abbreviation_score("fitz", "havingfitz"), 0.0);
    }

    #[test]
    fn test_long_candidates_never_match() {
        assert_eq!(abbreviation_score("beefy", "Beefster"), 0.0);
        assert_eq!(abbreviation_score("bobs", "Bob"), 0.0);
        assert_eq!(abbreviation_score("", "Bob"), 0.0);
    }
}
