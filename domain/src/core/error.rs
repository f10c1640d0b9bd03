//! Classified failures of the vote engine

use thiserror::Error;

/// Why a nomination could not be resolved to a single name.
///
/// These are expected, per-directive failures: the ledger stays untouched
/// and the caller decides whether to log and move on or escalate to the
/// operator. The default scan does the former.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// Nomination too short to mean anything.
    #[error("'{0}' is not a valid vote")]
    Invalid(String),

    /// Nobody on the roster cleared the similarity cutoff.
    #[error("'{0}' could not be matched to any player")]
    NoMatch(String),

    /// Two roster members are indistinguishably close.
    #[error("'{raw}' can be matched to '{}' or '{}'", candidates.0, candidates.1)]
    Ambiguous {
        raw: String,
        /// Best match and runner-up, in score order.
        candidates: (String, String),
    },
}

/// Why a player replacement was refused. Fatal to that replacement only;
/// the scan continues with later directives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplaceError {
    #[error("'{0}' is not a tracked player")]
    UnknownPlayer(String),

    /// Recording old -> new would make the replacement chain loop forever.
    #[error("replacing '{old}' with '{new}' would create a replacement loop")]
    Cycle { old: String, new: String },
}

/// Why a posted vote count block could not be read back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TallyError {
    /// The block exists but its shape is unusable. Callers should treat
    /// this as "no resumable state" and start from an empty ledger.
    #[error("unreadable vote count block: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_messages() {
        let err = ResolveError::Ambiguous {
            raw: "Bo".to_string(),
            candidates: ("Bob".to_string(), "Bobby".to_string()),
        };
        assert_eq!(err.to_string(), "'Bo' can be matched to 'Bob' or 'Bobby'");
        assert_eq!(
            ResolveError::NoMatch("xyz".to_string()).to_string(),
            "'xyz' could not be matched to any player"
        );
    }

    #[test]
    fn test_replace_error_messages() {
        let err = ReplaceError::Cycle {
            old: "Alice".to_string(),
            new: "Bob".to_string(),
        };
        assert!(err.to_string().contains("replacement loop"));
    }
}
