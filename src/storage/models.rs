//! Data models for the storage layer

use crate::cli::types::{MatchFormat, MatchId, MatchResult, PlayerId, PlayerRole};
use crate::engine::input::PerformanceInput;
use crate::engine::{AnalyticsSnapshot, DerivedFields, MatchRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Player profile stored in the database
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub role: PlayerRole,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub career_start: Option<NaiveDate>,
    pub career_end: Option<NaiveDate>,
    pub active: bool,
}

/// Profile fields supplied when registering a player; the id is assigned on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub role: PlayerRole,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub career_start: Option<NaiveDate>,
    pub career_end: Option<NaiveDate>,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            name: name.into(),
            date_of_birth: None,
            role,
            batting_style: None,
            bowling_style: None,
            career_start: None,
            career_end: None,
        }
    }
}

/// One line of `match list`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub date: NaiveDate,
    pub format: MatchFormat,
    pub opponent: String,
    pub venue: String,
    pub result: MatchResult,
    pub runs: u32,
    pub wickets: u32,
}

/// A stored match with its normalized raw performance and derived fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatch {
    #[serde(rename = "match")]
    pub match_record: MatchRecord,
    pub performance: PerformanceInput,
    pub derived: DerivedFields,
}

/// Identifies the set of matches a snapshot was computed from.
///
/// Match ids are never reused, so any insert raises `last_match_id` and any
/// delete without an insert lowers `match_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFingerprint {
    pub match_count: u32,
    pub last_match_id: Option<MatchId>,
}

/// The latest snapshot of a player along with when it was computed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSnapshot {
    pub snapshot: AnalyticsSnapshot,
    /// Number of matches the snapshot was computed from
    pub match_count: u32,
    /// Highest match id among them
    pub last_match_id: Option<MatchId>,
    /// Unix seconds
    pub computed_at: u64,
}

impl StoredSnapshot {
    pub fn fingerprint(&self) -> MatchFingerprint {
        MatchFingerprint {
            match_count: self.match_count,
            last_match_id: self.last_match_id,
        }
    }
}
