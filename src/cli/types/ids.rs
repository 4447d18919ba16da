//! ID types for players and matches.

use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Player IDs.
///
/// Every aggregation and storage call takes one of these explicitly, so the
/// engine never depends on which player happens to be marked active.
///
/// # Examples
///
/// ```rust
/// use cricket_stats::PlayerId;
///
/// let player_id = PlayerId::new(7);
/// assert_eq!(player_id.as_u64(), 7);
/// assert_eq!(player_id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        let id: u64 = s.trim().parse()?;
        if id == 0 {
            return Err(StatsError::validation("player id", "value", "must be positive"));
        }
        Ok(Self(id))
    }
}

/// Type-safe wrapper for Match IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_parse() {
        assert_eq!("12".parse::<PlayerId>().unwrap(), PlayerId::new(12));
        assert_eq!(" 3 ".parse::<PlayerId>().unwrap().as_u64(), 3);
        assert!("0".parse::<PlayerId>().is_err());
        assert!("abc".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_match_id_parse_and_display() {
        let id: MatchId = "99".parse().unwrap();
        assert_eq!(id.as_u64(), 99);
        assert_eq!(id.to_string(), "99");
        assert!("-1".parse::<MatchId>().is_err());
    }
}
