//! Vote count format selection

use chrono::{Local, NaiveDateTime, TimeZone};
use modtool_domain::VoteCount;

use crate::cli::commands::TallyFormat;
use crate::output::bbcode::BbcodeFormatter;

/// Render the final vote count in the requested format.
///
/// `previous_count` only matters for BBCode; the other formats carry no
/// post links.
pub fn format_count(count: &VoteCount, format: TallyFormat, previous_count: Option<u32>) -> String {
    match format {
        TallyFormat::Bbcode => BbcodeFormatter::format(count, previous_count),
        TallyFormat::Plain => count.to_lines().join("\n"),
        TallyFormat::Json => {
            serde_json::to_string_pretty(count).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

/// A human hint for how far off the deadline is, when it parses as a
/// local `YYYY-MM-DD HH:MM` date-time. Free-form deadline text gets no
/// hint; it still renders in the count as given.
pub fn deadline_hint(deadline: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(deadline.trim(), "%Y-%m-%d %H:%M").ok()?;
    let deadline = Local.from_local_datetime(&parsed).single()?;
    let remaining = deadline.signed_duration_since(Local::now());
    if remaining < chrono::Duration::zero() {
        return Some("deadline has passed".to_string());
    }
    let days = remaining.num_days();
    let hours = remaining.num_hours() - days * 24;
    Some(format!("deadline in {}d {}h", days, hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modtool_domain::{MatchRules, PostRef, VoteLedger, render};

    fn sample_count() -> VoteCount {
        let mut ledger =
            VoteLedger::from_roster(["Alice", "Bob", "Carol"].iter().copied(), MatchRules::default());
        ledger.record_vote("Alice", "Bob", PostRef::Post(4));
        render(&ledger, 1, 1, Some("soon"))
    }

    #[test]
    fn test_format_count_plain_matches_canonical_lines() {
        let count = sample_count();
        assert_eq!(
            format_count(&count, TallyFormat::Plain, None),
            count.to_lines().join("\n")
        );
    }

    #[test]
    fn test_format_count_bbcode_wraps_in_area() {
        let count = sample_count();
        let block = format_count(&count, TallyFormat::Bbcode, None);
        assert!(block.starts_with("[area=Official Vote Count 1-1]"));
        assert!(block.ends_with("[/area]"));
    }

    #[test]
    fn test_format_count_json_is_pretty_serialized() {
        let count = sample_count();
        let json = format_count(&count, TallyFormat::Json, None);
        assert!(json.contains("\"day\": 1"));
        assert!(json.contains("\"majority\": 2"));
    }

    #[test]
    fn test_deadline_hint_only_for_parseable_dates() {
        assert_eq!(deadline_hint("in a few days"), None);
        assert_eq!(
            deadline_hint("2001-01-01 00:00").as_deref(),
            Some("deadline has passed")
        );
        let hint = deadline_hint("2999-12-31 23:59").unwrap();
        assert!(hint.starts_with("deadline in "));
    }
}
