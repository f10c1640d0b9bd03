//! The tally view
//!
//! Derives wagons from the ledger, renders the Official Vote Count as plain
//! data plus a canonical text form, and reads a previously posted block back
//! into seed rows so a half-finished day can be resumed.
//!
//! Rendering and parsing are inverses over what matters: parsing the
//! rendered lines and reseeding a ledger reproduces the same wagons (with
//! seed references instead of the original posts).

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::TallyError;
use crate::core::post_ref::PostRef;
use crate::core::votee::Votee;

use super::ledger::VoteLedger;

/// Label every rendered count starts with.
pub const COUNT_HEADER: &str = "Official Vote Count";

/// Label of the voters-without-a-vote line.
pub const NOT_VOTING_LABEL: &str = "Not Voting";

/// Group all current entries by target. `None` collects the not-voting
/// crowd. Voters inside a group are ordered by reference, ties by name.
pub fn wagons(ledger: &VoteLedger) -> BTreeMap<Option<Votee>, Vec<(PostRef, String)>> {
    let mut groups: BTreeMap<Option<Votee>, Vec<(PostRef, String)>> = BTreeMap::new();
    for (voter, entry) in ledger.entries() {
        groups
            .entry(entry.target.clone())
            .or_default()
            .push((entry.post, voter.to_string()));
    }
    for voters in groups.values_mut() {
        voters.sort();
    }
    groups
}

/// How close a wagon is to ending the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WagonStatus {
    /// Nothing notable.
    Clear,
    /// `k` votes short; shown once the wagon is one away or past the
    /// warning ratio.
    LMinus(usize),
    /// At or past majority.
    Lynched,
}

impl WagonStatus {
    /// The parenthetical suffix as rendered, if any.
    pub fn suffix(&self) -> Option<String> {
        match self {
            WagonStatus::Clear => None,
            WagonStatus::LMinus(k) => Some(format!("(L-{})", k)),
            WagonStatus::Lynched => Some("(LYNCHED)".to_string()),
        }
    }
}

/// One rendered wagon line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagonLine {
    /// `None` is the not-voting line.
    pub target: Option<Votee>,
    pub voters: Vec<(PostRef, String)>,
    pub status: WagonStatus,
}

impl WagonLine {
    /// `"<target> (<count>): <voter>, <voter>, … (STATUS)"`.
    pub fn to_line(&self) -> String {
        let label = match &self.target {
            Some(votee) => votee.to_string(),
            None => NOT_VOTING_LABEL.to_string(),
        };
        let voters = self
            .voters
            .iter()
            .map(|(_, voter)| voter.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let mut line = format!("{} ({}): {}", label, self.voters.len(), voters);
        if let Some(suffix) = self.status.suffix() {
            line.push(' ');
            line.push_str(&suffix);
        }
        line
    }
}

/// The vote count as plain data, ready for any formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteCount {
    pub day: u32,
    /// How many counts have been posted this day, this one included.
    pub round: u32,
    pub player_count: usize,
    pub majority: usize,
    pub deadline: Option<String>,
    /// Player wagons by descending size (ties: earliest vote first), then
    /// the not-voting line, always last and always present.
    pub lines: Vec<WagonLine>,
}

impl VoteCount {
    /// The canonical plain-text block. This is exactly the shape
    /// [`parse_block`] reads back.
    pub fn to_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        out.push(format!("{} {}-{}", COUNT_HEADER, self.day, self.round));
        for line in &self.lines {
            out.push(line.to_line());
        }
        out.push(format!(
            "With {} players alive, it takes {} to lynch.",
            self.player_count, self.majority
        ));
        if let Some(deadline) = &self.deadline {
            out.push(format!("Deadline: {}", deadline));
        }
        out
    }
}

/// Snapshot the ledger into a renderable count.
pub fn render(ledger: &VoteLedger, day: u32, round: u32, deadline: Option<&str>) -> VoteCount {
    let mut groups = wagons(ledger);
    let not_voting = groups.remove(&None).unwrap_or_default();

    let majority = ledger.majority();
    let warning_ratio = ledger.rules().lynch_warning_ratio;
    let mut lines: Vec<WagonLine> = groups
        .into_iter()
        .map(|(target, voters)| {
            let status = wagon_status(voters.len(), majority, warning_ratio);
            WagonLine {
                target,
                voters,
                status,
            }
        })
        .collect();
    // Biggest wagon first; equal wagons by whoever was voted up first.
    lines.sort_by_key(|line| {
        (
            Reverse(line.voters.len()),
            line.voters.first().map(|(post, _)| *post),
        )
    });
    lines.push(WagonLine {
        target: None,
        voters: not_voting,
        status: WagonStatus::Clear,
    });

    VoteCount {
        day,
        round,
        player_count: ledger.len(),
        majority,
        deadline: deadline.map(str::to_string),
        lines,
    }
}

fn wagon_status(size: usize, majority: usize, warning_ratio: f64) -> WagonStatus {
    if size >= majority {
        WagonStatus::Lynched
    } else if majority - size == 1 || size as f64 / majority as f64 >= warning_ratio {
        WagonStatus::LMinus(majority - size)
    } else {
        WagonStatus::Clear
    }
}

/// One recovered row: a target (or not-voting) and its voters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyRow {
    pub target: Option<Votee>,
    pub voters: Vec<String>,
}

/// A vote count read back from posted text.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredCount {
    pub day: u32,
    pub round: u32,
    pub rows: Vec<TallyRow>,
}

/// Read a posted vote count block back into seed rows.
///
/// Takes the block's plain-text lines, markup already stripped. Per-line
/// parsing is lenient: anything that does not look like
/// `"<label> (<n>): voters"` is skipped, which covers the deadline and
/// players-alive footers. The header must parse and at least one row must
/// survive; otherwise the block is [`TallyError::Malformed`] and the caller
/// should start from an empty ledger instead.
pub fn parse_block(lines: &[String]) -> Result<RecoveredCount, TallyError> {
    let mut header: Option<(u32, u32)> = None;
    let mut rows = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("Deadline") {
            continue;
        }
        if header.is_none() && line.starts_with(COUNT_HEADER) {
            header = Some(parse_header(line)?);
            continue;
        }
        if let Some(row) = parse_row(line) {
            rows.push(row);
        }
    }

    let (day, round) = header.ok_or_else(|| {
        TallyError::Malformed(format!("no \"{} d-n\" header", COUNT_HEADER))
    })?;
    if rows.is_empty() {
        return Err(TallyError::Malformed("no wagon lines".to_string()));
    }
    Ok(RecoveredCount { day, round, rows })
}

/// `"Official Vote Count <day>-<round>"`; the final token carries both.
fn parse_header(line: &str) -> Result<(u32, u32), TallyError> {
    let tail = line
        .split_whitespace()
        .next_back()
        .ok_or_else(|| TallyError::Malformed(format!("bare header: '{}'", line)))?;
    let (day, round) = tail
        .split_once('-')
        .ok_or_else(|| TallyError::Malformed(format!("header has no day-round tag: '{}'", line)))?;
    let day = day
        .trim()
        .parse::<u32>()
        .map_err(|_| TallyError::Malformed(format!("unreadable day in '{}'", line)))?;
    let round = round
        .trim()
        .parse::<u32>()
        .map_err(|_| TallyError::Malformed(format!("unreadable round in '{}'", line)))?;
    Ok((day, round))
}

/// Parse one `"<label> (<n>): voters (STATUS)"` line; `None` skips it.
/// The voter count token is redundant and tolerated in any shape; the
/// voters themselves are what get re-counted.
fn parse_row(line: &str) -> Option<TallyRow> {
    let (label, voters) = line.split_once(':')?;

    // Drop a trailing "(L-2)" / "(LYNCHED)" marker if present.
    let voters = voters.trim_end();
    let voters = match (voters.rfind('('), voters.ends_with(')')) {
        (Some(open), true) => &voters[..open],
        _ => voters,
    };

    // Drop the "(n)" count token from the label if present.
    let label = label.trim();
    let label = match label.rsplit_once(' ') {
        Some((name, count)) if count.starts_with('(') && count.ends_with(')') => name.trim(),
        _ => label,
    };
    if label.is_empty() {
        return None;
    }

    let voters: Vec<String> = voters
        .split(',')
        .map(str::trim)
        .filter(|voter| !voter.is_empty())
        .map(str::to_string)
        .collect();

    let target = if label.eq_ignore_ascii_case(NOT_VOTING_LABEL) {
        None
    } else {
        Some(Votee::from_label(label))
    };
    Some(TallyRow { target, voters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::rules::MatchRules;

    fn ledger(players: &[&str]) -> VoteLedger {
        VoteLedger::from_roster(players.iter().copied(), MatchRules::default())
    }

    // ==================== Rendering ====================

    #[test]
    fn test_wagons_group_and_order_voters() {
        let mut ledger = ledger(&["Alice", "Bob", "Carol", "Dave", "Eve"]);
        ledger.record_vote("Carol", "Bob", PostRef::Post(8));
        ledger.record_vote("Alice", "Bob", PostRef::Post(3));

        let groups = wagons(&ledger);
        let bob_wagon = &groups[&Some(Votee::player("Bob"))];
        // Ordered by post, not alphabetically.
        assert_eq!(
            bob_wagon,
            &vec![
                (PostRef::Post(3), "Alice".to_string()),
                (PostRef::Post(8), "Carol".to_string()),
            ]
        );
        assert_eq!(groups[&None].len(), 3);
    }

    #[test]
    fn test_render_orders_by_size_then_earliest_vote() {
        let mut ledger = ledger(&["Alice", "Bob", "Carol", "Dave", "Eve", "Finn", "Gwen"]);
        ledger.record_vote("Alice", "Bob", PostRef::Post(10));
        ledger.record_vote("Carol", "Bob", PostRef::Post(11));
        ledger.record_vote("Dave", "Eve", PostRef::Post(5));
        ledger.record_vote("Finn", "Alice", PostRef::Post(2));

        let count = render(&ledger, 1, 1, None);
        let targets: Vec<_> = count
            .lines
            .iter()
            .map(|line| line.target.clone())
            .collect();
        assert_eq!(
            targets,
            vec![
                Some(Votee::player("Bob")),   // two votes
                Some(Votee::player("Alice")), // one vote, cast at post 2
                Some(Votee::player("Eve")),   // one vote, cast at post 5
                None,                         // not voting, always last
            ]
        );
    }

    #[test]
    fn test_not_voting_line_present_even_when_empty() {
        let mut ledger = ledger(&["Alice", "Bob", "Carol"]);
        ledger.record_vote("Alice", "Bob", PostRef::Post(1));
        ledger.record_vote("Bob", "Alice", PostRef::Post(2));
        ledger.record_vote("Carol", "Bob", PostRef::Post(3));

        let count = render(&ledger, 2, 1, None);
        let last = count.lines.last().unwrap();
        assert_eq!(last.target, None);
        assert!(last.voters.is_empty());
    }

    #[test]
    fn test_wagon_status_thresholds() {
        // Majority 5: one short always warns, and 3/5 hits the 0.6 ratio.
        assert_eq!(wagon_status(5, 5, 0.6), WagonStatus::Lynched);
        assert_eq!(wagon_status(6, 5, 0.6), WagonStatus::Lynched);
        assert_eq!(wagon_status(4, 5, 0.6), WagonStatus::LMinus(1));
        assert_eq!(wagon_status(3, 5, 0.6), WagonStatus::LMinus(2));
        assert_eq!(wagon_status(2, 5, 0.6), WagonStatus::Clear);
        // Majority 2: a single vote is one short.
        assert_eq!(wagon_status(1, 2, 0.6), WagonStatus::LMinus(1));
    }

    #[test]
    fn test_to_lines_canonical_shape() {
        let mut ledger = ledger(&["Alice", "Bob", "Carol", "Dave", "Eve"]);
        ledger.record_vote("Alice", "Bob", PostRef::Post(3));
        ledger.record_vote("Carol", "Bob", PostRef::Post(7));

        let count = render(&ledger, 2, 3, Some("2026-09-01 18:00"));
        assert_eq!(
            count.to_lines(),
            vec![
                "Official Vote Count 2-3".to_string(),
                "Bob (2): Alice, Carol (L-1)".to_string(),
                "Not Voting (3): Bob, Dave, Eve".to_string(),
                "With 5 players alive, it takes 3 to lynch.".to_string(),
                "Deadline: 2026-09-01 18:00".to_string(),
            ]
        );
    }

    #[test]
    fn test_lynched_status_survives_outside_directives() {
        let mut ledger = ledger(&["Alice", "Bob", "Carol", "Dave", "Eve"]);
        ledger.record_vote("Alice", "Bob", PostRef::Post(1));
        ledger.record_vote("Carol", "Bob", PostRef::Post(2));
        ledger.record_vote("Dave", "Bob", PostRef::Post(3));
        assert_eq!(
            render(&ledger, 1, 1, None).lines[0].status,
            WagonStatus::Lynched
        );

        // Voters outside the wagon keep moving; the hammered wagon does not
        // lose its status to any of it.
        ledger.record_vote("Eve", "Alice", PostRef::Post(4));
        ledger.record_unvote("Eve", PostRef::Post(5));
        ledger.replace_player("Eve", "Zed", PostRef::Post(6)).unwrap();

        let count = render(&ledger, 1, 1, None);
        let bob = count
            .lines
            .iter()
            .find(|line| line.target == Some(Votee::player("Bob")))
            .unwrap();
        assert_eq!(bob.status, WagonStatus::Lynched);
    }

    #[test]
    fn test_lynched_marker_rendered() {
        let mut ledger = ledger(&["Alice", "Bob", "Carol"]);
        ledger.record_vote("Alice", "Bob", PostRef::Post(1));
        ledger.record_vote("Carol", "Bob", PostRef::Post(2));

        let count = render(&ledger, 1, 4, None);
        assert_eq!(count.lines[0].status, WagonStatus::Lynched);
        assert!(count.to_lines()[1].ends_with("(LYNCHED)"));
    }

    // ==================== Parsing ====================

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_parse_posted_block() {
        let block = lines(&[
            "Official Vote Count 2-3",
            "Bob (2): Alice, Carol (L-1)",
            "No Lynch (1): Dave",
            "Not Voting (2): Bob, Eve",
            "With 5 players alive, it takes 3 to lynch.",
            "Deadline: 2026-09-01 18:00",
        ]);
        let recovered = parse_block(&block).unwrap();
        assert_eq!(recovered.day, 2);
        assert_eq!(recovered.round, 3);
        assert_eq!(
            recovered.rows,
            vec![
                TallyRow {
                    target: Some(Votee::player("Bob")),
                    voters: vec!["Alice".to_string(), "Carol".to_string()],
                },
                TallyRow {
                    target: Some(Votee::NoLynch),
                    voters: vec!["Dave".to_string()],
                },
                TallyRow {
                    target: None,
                    voters: vec!["Bob".to_string(), "Eve".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_parse_tolerates_hand_edited_shapes() {
        // Missing count token, extra blanks, spaced-out names.
        let block = lines(&[
            "  Official Vote Count 1-1  ",
            "",
            "Papa Zito: Not_Mafia,  northsidegal ",
            "Not Voting (1): Almost50",
        ]);
        let recovered = parse_block(&block).unwrap();
        assert_eq!(recovered.rows[0].target, Some(Votee::player("Papa Zito")));
        assert_eq!(
            recovered.rows[0].voters,
            vec!["Not_Mafia".to_string(), "northsidegal".to_string()]
        );
    }

    #[test]
    fn test_parse_requires_header() {
        let block = lines(&["Bob (2): Alice, Carol"]);
        let err = parse_block(&block);
        assert!(matches!(err, Err(TallyError::Malformed(_))));
    }

    #[test]
    fn test_parse_requires_at_least_one_row() {
        let block = lines(&[
            "Official Vote Count 1-1",
            "With 5 players alive, it takes 3 to lynch.",
        ]);
        let err = parse_block(&block);
        assert!(matches!(err, Err(TallyError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_garbled_header() {
        let block = lines(&["Official Vote Count x-y", "Bob (1): Alice"]);
        assert!(parse_block(&block).is_err());
        let block = lines(&["Official Vote Count", "Bob (1): Alice"]);
        assert!(parse_block(&block).is_err());
    }

    // ==================== Round trip ====================

    #[test]
    fn test_reseeding_from_rendered_lines_preserves_wagons() {
        let mut original = ledger(&["Alice", "Bob", "Carol", "Dave", "Eve"]);
        original.record_vote("Alice", "Bob", PostRef::Post(3));
        original.record_vote("Carol", "Bob", PostRef::Post(7));
        original.record_vote("Dave", "no lynch", PostRef::Post(9));

        let rendered = render(&original, 2, 1, Some("soon")).to_lines();
        let recovered = parse_block(&rendered).unwrap();

        let mut resumed = VoteLedger::new(MatchRules::default());
        resumed.seed_from_tally(&recovered.rows);

        assert_eq!(resumed.len(), original.len());
        assert_eq!(resumed.majority(), original.majority());
        let as_names = |groups: BTreeMap<Option<Votee>, Vec<(PostRef, String)>>| {
            groups
                .into_iter()
                .map(|(target, voters)| {
                    let mut names: Vec<String> =
                        voters.into_iter().map(|(_, name)| name).collect();
                    names.sort();
                    (target, names)
                })
                .collect::<BTreeMap<_, _>>()
        };
        assert_eq!(as_names(wagons(&resumed)), as_names(wagons(&original)));
    }
}
