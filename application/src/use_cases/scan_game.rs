//! Scan use case
//!
//! Walks a game thread post by post, strictly in order: seeds the ledger
//! from the newest posted vote count, counts votes and unvotes, applies
//! replacements, and surfaces everything notable through the observer.
//!
//! Two ordering rules shape this module. Directives are applied in the
//! order they appear, across lines and posts alike. And a hammer does not
//! print its vote count mid-post: the render is deferred until the post's
//! remaining lines have been handled, then delivered once.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use modtool_domain::{
    MatchRules, PostRef, TallyError, VoteCount, VoteEvent, VoteLedger, vote::tally,
};

use crate::ports::observer::{PostNote, ScanObserver};
use crate::ports::page_source::{ForumPost, PageSource, PageSourceError, VoteAction};

/// Errors that end a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("page fetch failed: {0}")]
    Page(#[from] PageSourceError),
}

/// Scan parameters.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// First post offset to request.
    pub start_post: u32,
    /// Stop after this post number; discovered from the thread's
    /// pagination when absent.
    pub end_post: Option<u32>,
    /// Posts per fetched page.
    pub page_size: u32,
    /// Track votes. Without this the scan only highlights keywords.
    pub count_votes: bool,
    /// Moderator username; inferred from the seeding post when absent.
    pub mod_name: Option<String>,
    /// Deadline to show in rendered counts.
    pub deadline: Option<String>,
    pub rules: MatchRules,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            start_post: 0,
            end_post: None,
            page_size: 200,
            count_votes: false,
            mod_name: None,
            deadline: None,
            rules: MatchRules::default(),
        }
    }
}

/// What a finished scan leaves behind.
///
/// The ledger is empty when vote counting was off or no readable vote
/// count post was found; callers should skip the final render then.
#[derive(Debug)]
pub struct ScanOutcome {
    pub ledger: VoteLedger,
    pub day: u32,
    pub round: u32,
    /// Post number of the vote count the run resumed from.
    pub seeded_from: Option<u32>,
}

/// The thread scanner.
pub struct ScanGame<S: PageSource> {
    source: Arc<S>,
    options: ScanOptions,
}

impl<S: PageSource> ScanGame<S> {
    pub fn new(source: Arc<S>, options: ScanOptions) -> Self {
        Self { source, options }
    }

    /// Run the scan to the end of the thread (or `end_post`).
    pub async fn execute(&self, observer: &dyn ScanObserver) -> Result<ScanOutcome, ScanError> {
        let mut state = ScanState::new(&self.options);
        let mut start = self.options.start_post;
        let mut end_post = self.options.end_post;
        let mut fetched = 0u32;
        // A zero page size would stall the offset (and divide by zero in
        // the page estimate); treat it as one post per page.
        let page_size = self.options.page_size.max(1);

        loop {
            if let Some(end) = end_post {
                if start >= end {
                    break;
                }
            }
            let page = self.source.fetch_page(start).await?;
            fetched += 1;
            if end_post.is_none() {
                end_post = page.total_posts;
            }
            observer.on_page(fetched, end_post.map(|end| end.div_ceil(page_size)));
            if page.posts.is_empty() {
                break;
            }

            let before = state.last_post;
            for post in &page.posts {
                if let Some(end) = end_post {
                    if post.number > end {
                        return Ok(state.finish());
                    }
                }
                state.process_post(post, observer);
            }
            // Boards serve their last page for any overshooting offset; a
            // page that moved nothing forward means the thread is done.
            if state.last_post == before {
                break;
            }
            start += page_size;
        }

        Ok(state.finish())
    }
}

/// Mutable scan state threaded through the posts.
struct ScanState<'a> {
    options: &'a ScanOptions,
    ledger: VoteLedger,
    mod_name: Option<String>,
    day: u32,
    round: u32,
    seeded_from: Option<u32>,
    last_post: u32,
}

impl<'a> ScanState<'a> {
    fn new(options: &'a ScanOptions) -> Self {
        Self {
            options,
            ledger: VoteLedger::new(options.rules),
            mod_name: options.mod_name.clone(),
            day: 0,
            round: 0,
            seeded_from: None,
            last_post: 0,
        }
    }

    fn finish(self) -> ScanOutcome {
        ScanOutcome {
            ledger: self.ledger,
            day: self.day,
            round: self.round,
            seeded_from: self.seeded_from,
        }
    }

    fn process_post(&mut self, post: &ForumPost, observer: &dyn ScanObserver) {
        if self.last_post > 0 && post.number <= self.last_post {
            return; // overlapping page
        }
        self.last_post = post.number;

        // Resume from the newest already-posted count before counting live.
        if self.options.count_votes && self.seeded_from.is_none() {
            if let Some(block) = &post.tally_block {
                self.seed(post, block, observer);
                return;
            }
        }

        let mut notes = Vec::new();
        let mut hammered = false;

        for line in &post.lines {
            self.scan_keywords(post, &line.text, &mut notes, observer);

            let action = line
                .action
                .clone()
                .or_else(|| untagged_action(&line.text));
            let Some(action) = action else { continue };

            let events = match action {
                VoteAction::Vote(target) => {
                    notes.push(PostNote::Vote(line.text.clone()));
                    self.ledger
                        .record_vote(&post.author, &target, PostRef::Post(post.number))
                }
                VoteAction::Unvote => {
                    notes.push(PostNote::Unvote(line.text.clone()));
                    self.ledger
                        .record_unvote(&post.author, PostRef::Post(post.number))
                }
            };
            for event in events {
                match event {
                    VoteEvent::Corrected { raw, resolved } => {
                        observer.on_warning(&format!("'{}' ==> '{}'", raw, resolved));
                    }
                    VoteEvent::Rejected(err) => observer.on_error(&err.to_string()),
                    VoteEvent::Hammer { target } => {
                        notes.push(PostNote::Hammer(format!("{} has been HAMMERED!", target)));
                        hammered = true;
                    }
                    VoteEvent::Updated { .. } | VoteEvent::Replaced { .. } => {}
                }
            }
        }

        if !notes.is_empty() {
            observer.on_post(&post.author, post.number, &notes);
        }
        if hammered {
            observer.on_vote_count(&self.render());
        }
    }

    fn scan_keywords(
        &mut self,
        post: &ForumPost,
        text: &str,
        notes: &mut Vec<PostNote>,
        observer: &dyn ScanObserver,
    ) {
        let lower = text.to_lowercase();
        if lower.starts_with("mod") || lower.contains("@mod") {
            notes.push(PostNote::ModMention(text.to_string()));
        }
        if text.to_uppercase().contains("V/LA") {
            notes.push(PostNote::Vla(text.to_string()));
        }
        // Replacement announcements only count from the moderator;
        // everyone else saying "replaces" is just talking.
        if text.contains("replaces") && self.is_mod(&post.author) {
            notes.push(PostNote::Replacement(text.to_string()));
            self.apply_replacement(post, text, observer);
        }
    }

    fn is_mod(&self, author: &str) -> bool {
        self.mod_name.as_deref() == Some(author)
    }

    fn apply_replacement(&mut self, post: &ForumPost, text: &str, observer: &dyn ScanObserver) {
        let Some((new, old)) = text.split_once("replaces") else {
            return;
        };
        let (new, old) = (new.trim(), old.trim());
        if new.is_empty() || old.is_empty() {
            observer.on_error(&format!("unable to read replacement: '{}'", text));
            return;
        }
        match self
            .ledger
            .replace_player(old, new, PostRef::Post(post.number))
        {
            Ok(_) => debug!(old, new, "replacement applied"),
            Err(err) => observer.on_error(&format!("unable to do replacement: {}", err)),
        }
    }

    fn seed(&mut self, post: &ForumPost, block: &[String], observer: &dyn ScanObserver) {
        match tally::parse_block(block) {
            Ok(recovered) => {
                self.day = recovered.day;
                self.round = recovered.round + 1;
                let events = self.ledger.seed_from_tally(&recovered.rows);
                self.seeded_from = Some(post.number);
                debug!(
                    voters = events.len(),
                    day = self.day,
                    post = post.number,
                    "ledger seeded from posted count"
                );
                if self.mod_name.is_none() {
                    self.mod_name = Some(post.author.clone());
                    info!(moderator = %post.author, "moderator inferred from vote count post");
                }
            }
            // Unreadable block: stay unseeded so a later, cleaner count
            // can still pick the run up.
            Err(TallyError::Malformed(detail)) => {
                observer.on_warning(&format!(
                    "vote count in post {} is unreadable ({}); waiting for a readable one",
                    post.number, detail
                ));
            }
        }
    }

    fn render(&self) -> VoteCount {
        tally::render(
            &self.ledger,
            self.day,
            self.round,
            self.options.deadline.as_deref(),
        )
    }
}

/// Fallback for lines whose vote markup did not survive extraction:
/// recognize explicit VOTE:/UNVOTE prefixes in plain text.
fn untagged_action(text: &str) -> Option<VoteAction> {
    let upper = text.to_uppercase();
    if upper.starts_with("VOTE:") {
        let (_, target) = text.split_once(':')?;
        return Some(VoteAction::Vote(target.trim().to_string()));
    }
    if upper.starts_with("UNVOTE") {
        return Some(VoteAction::Unvote);
    }
    None
}
