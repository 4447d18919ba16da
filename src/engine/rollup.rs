//! Partition-then-reduce rollups.
//!
//! [`StatLine::from_records`] is the single reduction used for the career
//! total and for every breakdown; [`rollup_by`] partitions records by a key
//! and reduces each group with it. Partitions live in a `BTreeMap` so output
//! order depends only on the keys.
//!
//! Each section of a line (batting, bowling, fielding, results) is its own
//! fold, so [`StatLine::refresh`] can rebuild one section without touching
//! the others.

use crate::cli::types::{MatchId, MatchResult};
use crate::engine::types::Category;
use crate::engine::derive::{derive_batting, derive_bowling, economy_rate, percentage, ratio};
use crate::engine::overs::Overs;
use crate::engine::types::PerformanceRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


/// Wickets in one multi-innings match that make a ten-wicket match.
pub const TEN_WICKET_MATCH: u32 = 10;

/// Highest individual innings; "110*" and "110" are different facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighestScore {
    pub runs: u32,
    pub not_out: bool,
    pub match_id: MatchId,
}

impl HighestScore {
    fn beats(&self, other: &HighestScore) -> bool {
        self.runs > other.runs || (self.runs == other.runs && self.not_out && !other.not_out)
    }
}

/// Best bowling figures in a single innings, e.g. 5/32.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestBowling {
    pub wickets: u32,
    pub runs: u32,
    pub match_id: MatchId,
}

impl BestBowling {
    fn beats(&self, other: &BestBowling) -> bool {
        self.wickets > other.wickets || (self.wickets == other.wickets && self.runs < other.runs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingStats {
    pub innings: u32,
    pub not_outs: u32,
    pub dismissals: u32,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    /// `None` until the player has been dismissed at least once.
    pub average: Option<f64>,
    pub strike_rate: f64,
    pub ducks: u32,
    pub fifties: u32,
    pub centuries: u32,
    pub highest_score: Option<HighestScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingStats {
    pub innings: u32,
    pub balls: u32,
    pub overs: Overs,
    pub maidens: u32,
    pub runs_conceded: u32,
    /// Runs conceded in spells that took at least one wicket.
    #[serde(default)]
    pub wicket_spell_runs: u32,
    pub wickets: u32,
    pub wides: u32,
    pub no_balls: u32,
    /// `wicket_spell_runs / wickets`; `None` while wicketless.
    pub average: Option<f64>,
    pub economy: f64,
    /// `None` while wicketless.
    pub strike_rate: Option<f64>,
    pub best_figures: Option<BestBowling>,
    pub three_wicket_hauls: u32,
    pub four_wicket_hauls: u32,
    pub five_wicket_hauls: u32,
    pub ten_wicket_matches: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldingStats {
    pub catches: u32,
    pub run_outs: u32,
    pub stumpings: u32,
    pub total_dismissals: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultStats {
    pub won: u32,
    pub lost: u32,
    pub drawn: u32,
    pub tied: u32,
    pub no_result: u32,
    pub win_percentage: f64,
}

/// Reduced statistics for one partition (or the whole career).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLine {
    pub matches: u32,
    pub batting: BattingStats,
    pub bowling: BowlingStats,
    pub fielding: FieldingStats,
    pub results: ResultStats,
}

impl BattingStats {
    fn add(&mut self, record: &PerformanceRecord) {
        for entry in record.performance.innings.batted() {
            let Some(derived) = derive_batting(entry) else {
                continue;
            };

            self.innings += 1;
            self.runs = self.runs.saturating_add(entry.runs);
            self.balls_faced = self.balls_faced.saturating_add(entry.balls_faced);
            self.fours = self.fours.saturating_add(entry.fours);
            self.sixes = self.sixes.saturating_add(entry.sixes);
            self.not_outs += u32::from(derived.is_not_out);
            self.ducks += u32::from(derived.is_duck);
            self.fifties += u32::from(derived.is_fifty);
            self.centuries += u32::from(derived.is_century);

            let candidate = HighestScore {
                runs: entry.runs,
                not_out: derived.is_not_out,
                match_id: record.match_id(),
            };
            // Earlier innings win exact ties.
            let replace = self
                .highest_score
                .as_ref()
                .map_or(true, |best| candidate.beats(best));
            if replace {
                self.highest_score = Some(candidate);
            }
        }
    }

    fn finish(&mut self) {
        self.dismissals = self.innings - self.not_outs;
        self.average = ratio(self.runs as f64, self.dismissals as f64);
        self.strike_rate = percentage(self.runs as f64, self.balls_faced as f64).unwrap_or(0.0);
    }
}

impl BowlingStats {
    fn add(&mut self, record: &PerformanceRecord) {
        let mut match_wickets = 0;
        for entry in record.performance.innings.bowled() {
            let Some(derived) = derive_bowling(entry) else {
                continue;
            };

            self.innings += 1;
            self.balls = self.balls.saturating_add(derived.balls_bowled);
            self.maidens = self.maidens.saturating_add(entry.maidens);
            self.runs_conceded = self.runs_conceded.saturating_add(entry.runs_conceded);
            if entry.wickets > 0 {
                self.wicket_spell_runs = self.wicket_spell_runs.saturating_add(entry.runs_conceded);
            }
            self.wickets = self.wickets.saturating_add(entry.wickets);
            self.wides = self.wides.saturating_add(entry.wides);
            self.no_balls = self.no_balls.saturating_add(entry.no_balls);
            self.three_wicket_hauls += u32::from(derived.is_three_wicket_haul);
            self.four_wicket_hauls += u32::from(derived.is_four_wicket_haul);
            self.five_wicket_hauls += u32::from(derived.is_five_wicket_haul);
            match_wickets += entry.wickets;

            let candidate = BestBowling {
                wickets: entry.wickets,
                runs: entry.runs_conceded,
                match_id: record.match_id(),
            };
            let replace = self
                .best_figures
                .as_ref()
                .map_or(true, |best| candidate.beats(best));
            if replace {
                self.best_figures = Some(candidate);
            }
        }

        if record.match_record.format.is_multi_innings() && match_wickets >= TEN_WICKET_MATCH {
            self.ten_wicket_matches += 1;
        }
    }

    fn finish(&mut self) {
        self.overs = Overs::from_balls(self.balls);
        self.economy = economy_rate(self.runs_conceded, self.overs);
        self.average = ratio(self.wicket_spell_runs as f64, self.wickets as f64);
        self.strike_rate = ratio(self.balls as f64, self.wickets as f64);
    }
}

impl FieldingStats {
    fn add(&mut self, record: &PerformanceRecord) {
        let fielding = &record.performance.fielding;
        self.catches = self.catches.saturating_add(fielding.catches);
        self.run_outs = self.run_outs.saturating_add(fielding.run_outs);
        self.stumpings = self.stumpings.saturating_add(fielding.stumpings);
    }

    fn finish(&mut self) {
        self.total_dismissals = self
            .catches
            .saturating_add(self.run_outs)
            .saturating_add(self.stumpings);
    }
}

impl ResultStats {
    fn add(&mut self, result: MatchResult) {
        match result {
            MatchResult::Won => self.won += 1,
            MatchResult::Lost => self.lost += 1,
            MatchResult::Draw => self.drawn += 1,
            MatchResult::Tie => self.tied += 1,
            MatchResult::NoResult => self.no_result += 1,
        }
    }

    fn finish(&mut self, matches: u32) {
        self.win_percentage = percentage(self.won as f64, matches as f64).unwrap_or(0.0);
    }
}

macro_rules! section_fold {
    ($($section:ty),+) => {
        $(impl $section {
            pub fn from_records(records: &[&PerformanceRecord]) -> Self {
                let mut section = Self::default();
                for record in records {
                    section.add(record);
                }
                section.finish();
                section
            }
        })+
    };
}

section_fold!(BattingStats, BowlingStats, FieldingStats);

impl ResultStats {
    pub fn from_records(records: &[&PerformanceRecord]) -> Self {
        let mut results = Self::default();
        for record in records {
            results.add(record.match_record.result);
        }
        results.finish(records.len() as u32);
        results
    }
}

impl StatLine {
    /// Reduce a group of records. An empty group yields zero counts, `None`
    /// averages and zero rates.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PerformanceRecord>,
    {
        let records: Vec<&PerformanceRecord> = records.into_iter().collect();
        let mut line = StatLine::default();
        line.refresh(&records, Category::All);
        line
    }

    /// Recompute the match count, the results and the section named by
    /// `category` from `records`. Other sections keep their current values.
    /// `All` and `Career` recompute every section.
    pub fn refresh(&mut self, records: &[&PerformanceRecord], category: Category) {
        let everything = matches!(category, Category::All | Category::Career);

        self.matches = records.len() as u32;
        self.results = ResultStats::from_records(records);
        if everything || category == Category::Batting {
            self.batting = BattingStats::from_records(records);
        }
        if everything || category == Category::Bowling {
            self.bowling = BowlingStats::from_records(records);
        }
        if everything || category == Category::Fielding {
            self.fielding = FieldingStats::from_records(records);
        }
    }
}

/// Group records by `key`, keeping input order within each group.
pub fn partition_by<'a, K, F>(
    records: &'a [PerformanceRecord],
    key: F,
) -> BTreeMap<K, Vec<&'a PerformanceRecord>>
where
    K: Ord,
    F: Fn(&PerformanceRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<&PerformanceRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(record);
    }
    groups
}

/// Partition by `key` and reduce each group to a [`StatLine`].
pub fn rollup_by<K, F>(records: &[PerformanceRecord], key: F) -> BTreeMap<K, StatLine>
where
    K: Ord,
    F: Fn(&PerformanceRecord) -> K,
{
    partition_by(records, key)
        .into_iter()
        .map(|(k, group)| (k, StatLine::from_records(group)))
        .collect()
}
