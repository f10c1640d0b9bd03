//! The similarity ensemble

use super::abbrev::abbreviation_score;

const EXACT_SCORE: f64 = 100.0;
const ABBREV_SCALE: f64 = 95.0;
const AFFIX_SCORE: f64 = 90.0;
const PARTIAL_SCALE: f64 = 85.0;
const FIRST_WORD_SCALE: f64 = 75.0;

/// Collapse a name to its comparable form: alphanumerics only, lowercased.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// How confidently `a` names the same player as `b`, in `[0.0, 100.0]`.
///
/// Symmetric ensemble of heuristics; the strongest signal wins. 100 is
/// reserved for names equal after normalization, abbreviations cap at 95 so
/// an exact roster name always beats its own acronym, and a strict prefix
/// or suffix ("fitz" for "havingfitz") lands at 90.
///
/// # Example
///
/// ```
/// use modtool_domain::similarity;
///
/// assert_eq!(similarity("papa zito", "PapaZito"), 100.0);
/// assert_eq!(similarity("NM", "Not_Mafia"), 95.0);
/// assert!(similarity("xyz", "Alice") < 30.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_norm = normalize_name(a);
    let b_norm = normalize_name(b);
    if a_norm == b_norm {
        return EXACT_SCORE;
    }

    let abbrev = abbreviation_score(&a_norm, b).max(abbreviation_score(&b_norm, a)) * ABBREV_SCALE;

    let ratio = strsim::normalized_levenshtein(&a_norm, &b_norm) * 100.0;

    let affix = if is_affix(&a_norm, &b_norm) { AFFIX_SCORE } else { 0.0 };

    let partial = partial_ratio(&a_norm, &b_norm) * PARTIAL_SCALE;

    // "Papa" should still find "Papa Zito": compare against the first
    // whitespace-separated word alone, both ways.
    let first_word = partial_ratio(&normalize_name(first_word(a)), &b_norm)
        .max(partial_ratio(&a_norm, &normalize_name(first_word(b))))
        * FIRST_WORD_SCALE;

    abbrev.max(ratio).max(affix).max(partial).max(first_word)
}

/// One string starts or ends the other outright.
fn is_affix(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    long.starts_with(short) || long.ends_with(short)
}

/// Best alignment of the shorter string inside the longer one, in
/// `[0.0, 1.0]`: slide a shorter-length window over the longer string and
/// keep the best Levenshtein ratio.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }
    let long_chars: Vec<char> = long.chars().collect();
    let mut best = 0.0_f64;
    for window in long_chars.windows(short_len) {
        let candidate: String = window.iter().collect();
        let ratio = strsim::normalized_levenshtein(short, &candidate);
        if ratio > best {
            best = ratio;
        }
    }
    best
}

fn first_word(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or(s)
}
