//! Career summary and the grouped breakdowns shown on the dashboard.

use crate::cli::types::{HomeAway, MatchFormat, PlayerId};
use crate::engine::rollup::{partition_by, StatLine};
use crate::engine::types::PerformanceRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    pub player_id: PlayerId,
    pub first_match: Option<NaiveDate>,
    pub last_match: Option<NaiveDate>,
    pub captain_matches: u32,
    pub wicketkeeper_matches: u32,
    #[serde(flatten)]
    pub stats: StatLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatStats {
    pub format: MatchFormat,
    #[serde(flatten)]
    pub stats: StatLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStats {
    pub year: i32,
    #[serde(flatten)]
    pub stats: StatLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentStats {
    pub opponent: String,
    #[serde(flatten)]
    pub stats: StatLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueStats {
    pub venue: String,
    pub city: String,
    pub country: String,
    #[serde(flatten)]
    pub stats: StatLine,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeAwayStats {
    pub home: StatLine,
    pub away: StatLine,
    pub neutral: StatLine,
}

impl HomeAwayStats {
    pub fn get(&self, home_away: HomeAway) -> &StatLine {
        match home_away {
            HomeAway::Home => &self.home,
            HomeAway::Away => &self.away,
            HomeAway::Neutral => &self.neutral,
        }
    }

    pub fn get_mut(&mut self, home_away: HomeAway) -> &mut StatLine {
        match home_away {
            HomeAway::Home => &mut self.home,
            HomeAway::Away => &mut self.away,
            HomeAway::Neutral => &mut self.neutral,
        }
    }
}

pub fn career_summary(player_id: PlayerId, records: &[PerformanceRecord]) -> CareerSummary {
    career_summary_with(player_id, records, StatLine::from_records(records))
}

/// Career summary around an already reduced line.
pub fn career_summary_with(
    player_id: PlayerId,
    records: &[PerformanceRecord],
    stats: StatLine,
) -> CareerSummary {
    let dates = records.iter().map(|r| r.match_record.date);
    CareerSummary {
        player_id,
        first_match: dates.clone().min(),
        last_match: dates.max(),
        captain_matches: records.iter().filter(|r| r.performance.is_captain).count() as u32,
        wicketkeeper_matches: records
            .iter()
            .filter(|r| r.performance.is_wicketkeeper)
            .count() as u32,
        stats,
    }
}

/// A breakdown row: a partition key and the line reduced from its records.
pub trait BreakdownRow: Sized {
    type Key: Ord;

    fn key_of(record: &PerformanceRecord) -> Self::Key;
    fn key(&self) -> Self::Key;
    fn from_parts(key: Self::Key, stats: StatLine) -> Self;
    fn stats(&self) -> &StatLine;
}

impl BreakdownRow for FormatStats {
    type Key = MatchFormat;

    fn key_of(record: &PerformanceRecord) -> MatchFormat {
        record.match_record.format
    }

    fn key(&self) -> MatchFormat {
        self.format
    }

    fn from_parts(format: MatchFormat, stats: StatLine) -> Self {
        FormatStats { format, stats }
    }

    fn stats(&self) -> &StatLine {
        &self.stats
    }
}

impl BreakdownRow for YearlyStats {
    type Key = i32;

    fn key_of(record: &PerformanceRecord) -> i32 {
        record.match_record.year()
    }

    fn key(&self) -> i32 {
        self.year
    }

    fn from_parts(year: i32, stats: StatLine) -> Self {
        YearlyStats { year, stats }
    }

    fn stats(&self) -> &StatLine {
        &self.stats
    }
}

impl BreakdownRow for OpponentStats {
    type Key = String;

    fn key_of(record: &PerformanceRecord) -> String {
        record.match_record.opponent.clone()
    }

    fn key(&self) -> String {
        self.opponent.clone()
    }

    fn from_parts(opponent: String, stats: StatLine) -> Self {
        OpponentStats { opponent, stats }
    }

    fn stats(&self) -> &StatLine {
        &self.stats
    }
}

impl BreakdownRow for VenueStats {
    /// (venue, city, country)
    type Key = (String, String, String);

    fn key_of(record: &PerformanceRecord) -> Self::Key {
        let m = &record.match_record;
        (m.venue.clone(), m.city.clone(), m.country.clone())
    }

    fn key(&self) -> Self::Key {
        (self.venue.clone(), self.city.clone(), self.country.clone())
    }

    fn from_parts((venue, city, country): Self::Key, stats: StatLine) -> Self {
        VenueStats {
            venue,
            city,
            country,
            stats,
        }
    }

    fn stats(&self) -> &StatLine {
        &self.stats
    }
}

/// Partition by the row key and reduce each group with `reduce`.
pub fn breakdown_with<T, F>(records: &[PerformanceRecord], mut reduce: F) -> Vec<T>
where
    T: BreakdownRow,
    F: FnMut(&T::Key, &[&PerformanceRecord]) -> StatLine,
{
    partition_by(records, T::key_of)
        .into_iter()
        .map(|(key, group)| {
            let stats = reduce(&key, group.as_slice());
            T::from_parts(key, stats)
        })
        .collect()
}

pub fn breakdown<T: BreakdownRow>(records: &[PerformanceRecord]) -> Vec<T> {
    breakdown_with(records, |_, group| StatLine::from_records(group.iter().copied()))
}

pub fn format_breakdown(records: &[PerformanceRecord]) -> Vec<FormatStats> {
    breakdown(records)
}

pub fn yearly_breakdown(records: &[PerformanceRecord]) -> Vec<YearlyStats> {
    breakdown(records)
}

pub fn opponent_breakdown(records: &[PerformanceRecord]) -> Vec<OpponentStats> {
    breakdown(records)
}

pub fn venue_breakdown(records: &[PerformanceRecord]) -> Vec<VenueStats> {
    breakdown(records)
}

/// Home/away split with each present flag reduced by `reduce`; absent flags stay empty.
pub fn home_away_breakdown_with<F>(
    records: &[PerformanceRecord],
    mut reduce: F,
) -> HomeAwayStats
where
    F: FnMut(HomeAway, &[&PerformanceRecord]) -> StatLine,
{
    let mut split = HomeAwayStats::default();
    for (home_away, group) in partition_by(records, |r| r.match_record.home_away) {
        *split.get_mut(home_away) = reduce(home_away, group.as_slice());
    }
    split
}

pub fn home_away_breakdown(records: &[PerformanceRecord]) -> HomeAwayStats {
    home_away_breakdown_with(records, |_, group| StatLine::from_records(group.iter().copied()))
}
