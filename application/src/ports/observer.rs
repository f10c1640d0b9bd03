//! Scan observer port
//!
//! Presentation implements this to paint per-post findings and vote counts;
//! the use case itself never prints. Callbacks arrive in report order:
//! warnings and errors as their directives are applied, then the post
//! block, then any deferred vote count.

use modtool_domain::VoteCount;

/// A notable line inside a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostNote {
    /// Somebody addressed the moderator.
    ModMention(String),
    /// Vacation / limited availability announcement.
    Vla(String),
    /// A replacement announcement (moderator-authored).
    Replacement(String),
    /// A counted vote line.
    Vote(String),
    /// A counted unvote line.
    Unvote(String),
    /// The vote that ended the day.
    Hammer(String),
}

impl PostNote {
    /// The underlying line text.
    pub fn text(&self) -> &str {
        match self {
            PostNote::ModMention(text)
            | PostNote::Vla(text)
            | PostNote::Replacement(text)
            | PostNote::Vote(text)
            | PostNote::Unvote(text)
            | PostNote::Hammer(text) => text,
        }
    }
}

/// Callbacks for everything a scan wants shown.
pub trait ScanObserver: Send + Sync {
    /// A post produced at least one notable line.
    fn on_post(&self, author: &str, number: u32, notes: &[PostNote]);

    /// Something the operator should see; the run continues.
    fn on_warning(&self, message: &str);

    /// A directive failed; the run continues.
    fn on_error(&self, message: &str);

    /// A fresh vote count should be shown (deferred to the end of the
    /// post whose vote triggered it).
    fn on_vote_count(&self, count: &VoteCount);

    /// Fetch progress: pages retrieved so far, and the expected total
    /// once the thread length is known.
    fn on_page(&self, _fetched: u32, _total: Option<u32>) {}
}

/// Observer that swallows everything. Useful in tests and for library
/// callers that only want the final [`ScanOutcome`](crate::ScanOutcome).
pub struct SilentObserver;

impl ScanObserver for SilentObserver {
    fn on_post(&self, _author: &str, _number: u32, _notes: &[PostNote]) {}
    fn on_warning(&self, _message: &str) {}
    fn on_error(&self, _message: &str) {}
    fn on_vote_count(&self, _count: &VoteCount) {}
}
