//! Post reference value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a ledger entry came from (Value Object)
///
/// Votes observed in the thread carry the forum post number they were cast
/// in. Votes recovered from a previously posted vote count have no post of
/// their own, so they get a `Seeded` placeholder instead, numbered in the
/// order they were recovered.
///
/// Ordering is chronological: every seeded reference predates every real
/// post, seeded references keep their recovery order, and real posts compare
/// by post number.
///
/// # Example
///
/// ```
/// use modtool_domain::PostRef;
///
/// assert!(PostRef::Seeded(0) < PostRef::Seeded(1));
/// assert!(PostRef::Seeded(7) < PostRef::Post(1));
/// assert!(PostRef::Post(17) < PostRef::Post(120));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PostRef {
    /// Placeholder assigned while rebuilding state from a posted count.
    /// Variant order matters: derived `Ord` sorts these before real posts.
    Seeded(u32),
    /// A real forum post number.
    Post(u32),
}

impl PostRef {
    /// The numeric identifier used in serialized output.
    ///
    /// Real posts keep their number; seeded references map to -99, -100, …
    /// so they can never collide with a real post number.
    pub fn id(&self) -> i64 {
        match self {
            PostRef::Post(n) => i64::from(*n),
            PostRef::Seeded(seq) => -99 - i64::from(*seq),
        }
    }

    /// True for references recovered from a posted count.
    pub fn is_seeded(&self) -> bool {
        matches!(self, PostRef::Seeded(_))
    }

    /// The real post number, if there is one.
    pub fn post_number(&self) -> Option<u32> {
        match self {
            PostRef::Post(n) => Some(*n),
            PostRef::Seeded(_) => None,
        }
    }
}

impl fmt::Display for PostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostRef::Post(n) => write!(f, "#{}", n),
            PostRef::Seeded(_) => write!(f, "{}", self.id()),
        }
    }
}
