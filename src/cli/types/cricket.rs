//! Cricket vocabulary: match formats, levels, results and dismissal kinds.
//!
//! Every enum round-trips through the same lowercase/canonical string used in
//! submission JSON, the SQLite columns and the CLI, so an unknown value is
//! rejected with [`StatsError::InvalidEnum`] instead of being coerced.

use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $text)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical string form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = StatsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| StatsError::InvalidEnum {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

string_enum! {
    /// Match format. Declaration order is the display order of the format breakdown.
    MatchFormat, "format" {
        Test => "Test",
        Odi => "ODI",
        T20 => "T20",
        FirstClass => "First-class",
        ListA => "List-A",
        T20Domestic => "T20-domestic",
    }
}

impl MatchFormat {
    /// Test and First-class matches give the player two innings with bat and ball.
    pub fn is_multi_innings(&self) -> bool {
        matches!(self, MatchFormat::Test | MatchFormat::FirstClass)
    }
}

string_enum! {
    MatchLevel, "level" {
        Club => "club",
        Domestic => "domestic",
        International => "international",
    }
}

string_enum! {
    MatchResult, "result" {
        Won => "won",
        Lost => "lost",
        Draw => "draw",
        Tie => "tie",
        NoResult => "no_result",
    }
}

string_enum! {
    /// Venue relationship to the player's team.
    HomeAway, "home/away flag" {
        Home => "home",
        Away => "away",
        Neutral => "neutral",
    }
}

string_enum! {
    DismissalType, "dismissal type" {
        Caught => "caught",
        Bowled => "bowled",
        Lbw => "lbw",
        RunOut => "run_out",
        Stumped => "stumped",
        HitWicket => "hit_wicket",
        NotOut => "not_out",
        RetiredHurt => "retired_hurt",
    }
}

string_enum! {
    PlayerRole, "player role" {
        Batsman => "batsman",
        Bowler => "bowler",
        AllRounder => "all_rounder",
        WicketKeeper => "wicket_keeper",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_strings_round_trip() {
        for format in MatchFormat::ALL {
            assert_eq!(format.as_str().parse::<MatchFormat>().unwrap(), *format);
        }
        assert_eq!("odi".parse::<MatchFormat>().unwrap(), MatchFormat::Odi);
        assert_eq!(MatchFormat::FirstClass.to_string(), "First-class");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        match "Hundred".parse::<MatchFormat>() {
            Err(StatsError::InvalidEnum { kind, value }) => {
                assert_eq!(kind, "format");
                assert_eq!(value, "Hundred");
            }
            other => panic!("Expected InvalidEnum, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_innings_formats() {
        let multi: Vec<_> = MatchFormat::ALL
            .iter()
            .filter(|f| f.is_multi_innings())
            .collect();
        assert_eq!(multi, vec![&MatchFormat::Test, &MatchFormat::FirstClass]);
    }

    #[test]
    fn test_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&DismissalType::RunOut).unwrap();
        assert_eq!(json, "\"run_out\"");
        let parsed: MatchFormat = serde_json::from_str("\"T20-domestic\"").unwrap();
        assert_eq!(parsed, MatchFormat::T20Domestic);
        assert!(serde_json::from_str::<MatchResult>("\"abandoned\"").is_err());
    }

    #[test]
    fn test_dismissal_types_cover_histogram() {
        assert_eq!(DismissalType::ALL.len(), 8);
        assert_eq!(DismissalType::ALL[6], DismissalType::NotOut);
    }
}
