//! Validated match and performance records consumed by the engine.
//!
//! These are only built through [`crate::engine::input`], so every count is
//! non-negative and every overs value is legal by construction.

use crate::cli::types::{
    DismissalType, HomeAway, MatchFormat, MatchId, MatchLevel, MatchResult, PlayerId,
};
use crate::engine::overs::Overs;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
}

/// One real-world fixture the player took part in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    pub player_id: PlayerId,
    pub format: MatchFormat,
    pub level: MatchLevel,
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    pub country: String,
    pub opponent: String,
    pub result: MatchResult,
    pub home_away: HomeAway,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
}

impl MatchRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattingEntry {
    pub did_not_bat: bool,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    /// Always `Some` for an innings that was batted.
    pub dismissal_type: Option<DismissalType>,
    pub bowler: Option<String>,
    pub fielder: Option<String>,
    pub position: Option<u8>,
}

impl BattingEntry {
    pub fn did_not_bat() -> Self {
        Self {
            did_not_bat: true,
            ..Self::default()
        }
    }

    pub fn is_not_out(&self) -> bool {
        self.dismissal_type == Some(DismissalType::NotOut)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BowlingEntry {
    pub did_not_bowl: bool,
    pub overs: Overs,
    pub maidens: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub wides: u32,
    pub no_balls: u32,
}

impl BowlingEntry {
    pub fn did_not_bowl() -> Self {
        Self {
            did_not_bowl: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldingEntry {
    pub catches: u32,
    pub run_outs: u32,
    pub stumpings: u32,
}

/// Innings slots available to the player, fixed by the match format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InningsLayout {
    Single {
        batting: Option<BattingEntry>,
        bowling: Option<BowlingEntry>,
    },
    Multi {
        first_batting: Option<BattingEntry>,
        second_batting: Option<BattingEntry>,
        first_bowling: Option<BowlingEntry>,
        second_bowling: Option<BowlingEntry>,
    },
}

impl InningsLayout {
    fn batting_slots(&self) -> [Option<&BattingEntry>; 2] {
        match self {
            InningsLayout::Single { batting, .. } => [batting.as_ref(), None],
            InningsLayout::Multi {
                first_batting,
                second_batting,
                ..
            } => [first_batting.as_ref(), second_batting.as_ref()],
        }
    }

    fn bowling_slots(&self) -> [Option<&BowlingEntry>; 2] {
        match self {
            InningsLayout::Single { bowling, .. } => [bowling.as_ref(), None],
            InningsLayout::Multi {
                first_bowling,
                second_bowling,
                ..
            } => [first_bowling.as_ref(), second_bowling.as_ref()],
        }
    }

    /// Batting innings the player actually batted in, in innings order.
    pub fn batted(&self) -> impl Iterator<Item = &BattingEntry> + '_ {
        self.batting_slots()
            .into_iter()
            .flatten()
            .filter(|b| !b.did_not_bat)
    }

    /// Bowling spells the player actually bowled, in innings order.
    pub fn bowled(&self) -> impl Iterator<Item = &BowlingEntry> + '_ {
        self.bowling_slots()
            .into_iter()
            .flatten()
            .filter(|b| !b.did_not_bowl)
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, InningsLayout::Multi { .. })
    }
}

/// The player's contribution to one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Performance {
    pub innings: InningsLayout,
    pub fielding: FieldingEntry,
    pub is_captain: bool,
    pub is_wicketkeeper: bool,
}

/// A match paired with the player's performance in it; the engine's input unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub match_record: MatchRecord,
    pub performance: Performance,
}

impl PerformanceRecord {
    pub fn match_id(&self) -> MatchId {
        self.match_record.id
    }
}

/// Which part of the analytics snapshot a recalculation refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Batting,
    Bowling,
    Fielding,
    Career,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::All,
        Category::Batting,
        Category::Bowling,
        Category::Fielding,
        Category::Career,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Batting => "batting",
            Category::Bowling => "bowling",
            Category::Fielding => "fielding",
            Category::Career => "career",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
