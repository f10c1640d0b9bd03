//! Votee value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a vote points at (Value Object)
///
/// Either a player, by canonical roster name with its original case, or the
/// reserved "No Lynch" outcome. "No Lynch" is not a player: it wins by wagon
/// size like any other target, but it never appears on the roster and is
/// never subject to replacement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Votee {
    /// The reserved no-lynch outcome.
    NoLynch,
    /// A player, by canonical roster name.
    Player(String),
}

impl Votee {
    /// Label used for the no-lynch wagon in rendered counts.
    pub const NO_LYNCH_LABEL: &'static str = "No Lynch";

    pub fn player(name: impl Into<String>) -> Self {
        Votee::Player(name.into())
    }

    /// Read a rendered wagon label back into a votee.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case(Self::NO_LYNCH_LABEL) {
            Votee::NoLynch
        } else {
            Votee::Player(label.to_string())
        }
    }

    /// The canonical player name, if this is a player.
    pub fn as_player(&self) -> Option<&str> {
        match self {
            Votee::Player(name) => Some(name),
            Votee::NoLynch => None,
        }
    }
}

impl fmt::Display for Votee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Votee::Player(name) => write!(f, "{}", name),
            Votee::NoLynch => write!(f, "{}", Self::NO_LYNCH_LABEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_round_trips_through_label() {
        let votee = Votee::player("Papa Zito");
        assert_eq!(votee.to_string(), "Papa Zito");
        assert_eq!(Votee::from_label("Papa Zito"), votee);
    }

    #[test]
    fn test_no_lynch_label_is_reserved() {
        assert_eq!(Votee::from_label("No Lynch"), Votee::NoLynch);
        assert_eq!(Votee::from_label("no lynch"), Votee::NoLynch);
        assert_eq!(Votee::NoLynch.to_string(), "No Lynch");
        assert_eq!(Votee::NoLynch.as_player(), None);
    }
}
