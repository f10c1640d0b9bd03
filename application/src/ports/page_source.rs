//! Page source port
//!
//! Where posts come from. The scan never touches HTML or HTTP itself; an
//! adapter (live forum client or saved-page reader) hands it pages of
//! already-extracted posts.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a page source.
#[derive(Error, Debug)]
pub enum PageSourceError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("unexpected response status: {0}")]
    BadStatus(u16),

    #[error("could not read page: {0}")]
    Unreadable(String),
}

/// A vote action tagged on a line by the forum's vote markup, or
/// recognized from an explicit VOTE:/UNVOTE prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteAction {
    /// An explicit nomination; the payload is the raw target text.
    Vote(String),
    Unvote,
}

/// One plain-text line of a post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLine {
    pub text: String,
    /// Set when the line carried vote markup.
    pub action: Option<VoteAction>,
}

impl PostLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: None,
        }
    }

    pub fn vote(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: Some(VoteAction::Vote(target.into())),
        }
    }

    pub fn unvote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: Some(VoteAction::Unvote),
        }
    }
}

/// One post, reduced to what the scan needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPost {
    pub number: u32,
    pub author: String,
    pub lines: Vec<PostLine>,
    /// Plain lines of an embedded "Official Vote Count" block, legend
    /// first, when the post carries one. Kept out of `lines` so the block
    /// is never re-scanned as post text.
    pub tally_block: Option<Vec<String>>,
}

impl ForumPost {
    pub fn new(number: u32, author: impl Into<String>) -> Self {
        Self {
            number,
            author: author.into(),
            lines: Vec::new(),
            tally_block: None,
        }
    }

    pub fn with_line(mut self, line: PostLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_tally_block(mut self, lines: Vec<String>) -> Self {
        self.tally_block = Some(lines);
        self
    }
}

/// One fetched page of posts.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub posts: Vec<ForumPost>,
    /// Total posts in the topic, when the page advertises it.
    pub total_posts: Option<u32>,
}

/// Where posts come from.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page of posts starting at post offset `start`.
    async fn fetch_page(&self, start: u32) -> Result<Page, PageSourceError>;
}
