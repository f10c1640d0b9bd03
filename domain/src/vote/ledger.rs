//! The vote ledger state machine
//!
//! One [`VoteLedger`] owns everything a vote count needs: the roster, each
//! tracked voter's standing vote, and the replacement chain. Directives
//! arrive one at a time in post order; each either fully updates one
//! voter's entry or fails and mutates nothing.
//!
//! Directives never print. They return [`VoteEvent`]s for the caller to act
//! on once the current post is finished — a hammer landing mid-post must
//! not interleave its vote count with the post's remaining lines.

use std::collections::{BTreeMap, HashMap};

use crate::core::error::{ReplaceError, ResolveError};
use crate::core::post_ref::PostRef;
use crate::core::votee::Votee;

use super::resolve::resolve;
use super::rules::MatchRules;
use super::tally::TallyRow;

/// One tracked voter's standing vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteEntry {
    /// Where the directive that produced this entry was cast.
    pub post: PostRef,
    /// Current target; `None` is "not voting".
    pub target: Option<Votee>,
}

/// What a directive did, reported back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteEvent {
    /// The voter's entry was replaced.
    Updated {
        voter: String,
        post: PostRef,
        target: Option<Votee>,
    },
    /// The nomination needed fuzzy correction to land on a roster name.
    Corrected { raw: String, resolved: Votee },
    /// This vote pushed the target's wagon past strict majority.
    Hammer { target: Votee },
    /// The directive was refused; the ledger is unchanged.
    Rejected(ResolveError),
    /// A player was swapped out mid-game; entry and wagon carried over.
    Replaced {
        old: String,
        new: String,
        announced_at: PostRef,
    },
}

/// The per-voter vote state machine.
///
/// Invariants:
/// - at most one entry per voter; directives replace, never append
/// - every tracked voter is on the roster (replacement retires the old
///   entry but keeps the old name resolvable)
/// - the replacement chain is acyclic, so resolution always terminates
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    entries: BTreeMap<String, VoteEntry>,
    roster: Vec<String>,
    replacements: HashMap<String, String>,
    rules: MatchRules,
    next_seed: u32,
}

impl VoteLedger {
    /// An empty ledger that tracks nobody. Every directive against it is
    /// silently ignored until it gets seeded.
    pub fn new(rules: MatchRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// A fresh-game ledger: everyone tracked, nobody voting yet.
    pub fn from_roster<I, S>(players: I, rules: MatchRules) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ledger = Self::new(rules);
        let voters: Vec<String> = players.into_iter().map(Into::into).collect();
        ledger.seed_from_tally(&[TallyRow {
            target: None,
            voters,
        }]);
        ledger
    }

    /// Number of tracked voters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Votes needed to lynch right now. Strictly more than half: floats
    /// with the voter count, which replacement leaves unchanged.
    pub fn majority(&self) -> usize {
        self.entries.len() / 2 + 1
    }

    pub fn is_tracked(&self, voter: &str) -> bool {
        self.entries.contains_key(voter)
    }

    /// Names nominations resolve against. Replaced players stay listed so
    /// a stale nomination of the old name still works, then follows the
    /// chain to whoever holds the seat today.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    /// All current entries, by voter.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &VoteEntry)> {
        self.entries
            .iter()
            .map(|(voter, entry)| (voter.as_str(), entry))
    }

    pub fn entry(&self, voter: &str) -> Option<&VoteEntry> {
        self.entries.get(voter)
    }

    /// Current size of the wagon on `target`.
    pub fn wagon_size(&self, target: &Votee) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.target.as_ref() == Some(target))
            .count()
    }

    /// Resolve a nomination, then walk it through the replacement chain to
    /// the player actually holding the seat.
    pub fn resolve_nomination(&self, raw: &str) -> Result<Votee, ResolveError> {
        let mut target = resolve(raw, &self.roster, &self.rules)?;
        while let Votee::Player(name) = &target {
            match self.replacements.get(name) {
                Some(next) => target = Votee::Player(next.clone()),
                None => break,
            }
        }
        Ok(target)
    }

    /// Count `voter`'s nomination from `post`.
    ///
    /// Untracked voters are ignored without error — spectators and the
    /// moderator type VOTE too. On a resolution failure the previous entry
    /// stands and a [`VoteEvent::Rejected`] is returned instead.
    pub fn record_vote(&mut self, voter: &str, raw: &str, post: PostRef) -> Vec<VoteEvent> {
        if !self.is_tracked(voter) {
            return Vec::new();
        }
        let target = match self.resolve_nomination(raw) {
            Ok(target) => target,
            Err(err) => return vec![VoteEvent::Rejected(err)],
        };

        let mut events = Vec::new();
        if raw.to_lowercase() != target.to_string().to_lowercase() {
            events.push(VoteEvent::Corrected {
                raw: raw.to_string(),
                resolved: target.clone(),
            });
        }
        self.entries.insert(
            voter.to_string(),
            VoteEntry {
                post,
                target: Some(target.clone()),
            },
        );
        events.push(VoteEvent::Updated {
            voter: voter.to_string(),
            post,
            target: Some(target.clone()),
        });
        if self.wagon_size(&target) > self.entries.len() / 2 {
            events.push(VoteEvent::Hammer { target });
        }
        events
    }

    /// Clear `voter`'s vote as of `post`. Never hammers, and repeating it
    /// is harmless.
    pub fn record_unvote(&mut self, voter: &str, post: PostRef) -> Vec<VoteEvent> {
        if !self.is_tracked(voter) {
            return Vec::new();
        }
        self.entries.insert(
            voter.to_string(),
            VoteEntry { post, target: None },
        );
        vec![VoteEvent::Updated {
            voter: voter.to_string(),
            post,
            target: None,
        }]
    }

    /// Seat `new` in `old`'s place.
    ///
    /// `new` joins the roster and inherits `old`'s standing vote with its
    /// reference intact, and every vote sitting on `old` is rewritten to
    /// `new` (those keep their references too). `old` stays on the roster
    /// so stale nominations still resolve. `announced_at` is carried only
    /// in the event, for reporting.
    pub fn replace_player(
        &mut self,
        old: &str,
        new: &str,
        announced_at: PostRef,
    ) -> Result<Vec<VoteEvent>, ReplaceError> {
        let Some(entry) = self.entries.get(old).cloned() else {
            return Err(ReplaceError::UnknownPlayer(old.to_string()));
        };
        // Walk the chain from `new` before touching anything: if it leads
        // back to `old`, inserting this link would close a loop.
        let mut probe = new;
        loop {
            if probe == old {
                return Err(ReplaceError::Cycle {
                    old: old.to_string(),
                    new: new.to_string(),
                });
            }
            match self.replacements.get(probe) {
                Some(next) => probe = next.as_str(),
                None => break,
            }
        }

        if !self.roster.iter().any(|name| name == new) {
            self.roster.push(new.to_string());
        }
        self.replacements.insert(old.to_string(), new.to_string());
        self.entries.remove(old);
        self.entries.insert(new.to_string(), entry);

        let old_target = Votee::player(old);
        for entry in self.entries.values_mut() {
            if entry.target.as_ref() == Some(&old_target) {
                entry.target = Some(Votee::player(new));
            }
        }

        Ok(vec![VoteEvent::Replaced {
            old: old.to_string(),
            new: new.to_string(),
            announced_at,
        }])
    }

    /// Rebuild state from rows recovered out of a posted vote count.
    ///
    /// Wipes whatever was tracked before. The voters named in the rows
    /// become the roster; each gets the next seed placeholder reference,
    /// so recovered votes keep their relative order but sort before
    /// anything observed live.
    pub fn seed_from_tally(&mut self, rows: &[TallyRow]) -> Vec<VoteEvent> {
        self.entries.clear();
        self.roster.clear();
        self.replacements.clear();
        self.next_seed = 0;

        let mut events = Vec::new();
        for row in rows {
            for voter in &row.voters {
                let post = PostRef::Seeded(self.next_seed);
                self.next_seed += 1;
                self.entries.insert(
                    voter.clone(),
                    VoteEntry {
                        post,
                        target: row.target.clone(),
                    },
                );
                if !self.roster.iter().any(|name| name == voter) {
                    self.roster.push(voter.clone());
                }
                events.push(VoteEvent::Updated {
                    voter: voter.clone(),
                    post,
                    target: row.target.clone(),
                });
            }
        }
        events
    }
}
