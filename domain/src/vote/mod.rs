//! The vote count domain
//!
//! Everything between "somebody typed VOTE: bob" and a posted Official Vote
//! Count lives here:
//!
//! - [`resolve`] turns free-text nominations into canonical names
//! - [`ledger`] is the per-voter state machine (vote / unvote / replace / seed)
//! - [`tally`] derives wagons and renders or re-reads the vote count block
//! - [`rules`] carries the tunable scoring and threshold knobs

pub mod ledger;
pub mod resolve;
pub mod rules;
pub mod tally;

pub use ledger::{VoteEntry, VoteEvent, VoteLedger};
pub use resolve::resolve;
pub use rules::MatchRules;
pub use tally::{RecoveredCount, TallyRow, VoteCount, WagonLine, WagonStatus};
