//! Record builders shared by the engine's unit tests.

use crate::cli::types::{
    DismissalType, HomeAway, MatchFormat, MatchId, MatchLevel, MatchResult, PlayerId,
};
use crate::engine::overs::Overs;
use crate::engine::types::{
    BattingEntry, BowlingEntry, FieldingEntry, InningsLayout, MatchRecord, Performance,
    PerformanceRecord,
};

pub const PLAYER: PlayerId = PlayerId(1);

pub fn bat(runs: u32, balls_faced: u32, dismissal: DismissalType) -> BattingEntry {
    BattingEntry {
        runs,
        balls_faced,
        dismissal_type: Some(dismissal),
        ..BattingEntry::default()
    }
}

pub fn bowl(overs: f64, runs_conceded: u32, wickets: u32) -> BowlingEntry {
    BowlingEntry {
        overs: Overs::from_notation(overs).unwrap(),
        runs_conceded,
        wickets,
        ..BowlingEntry::default()
    }
}

pub struct RecordBuilder {
    match_record: MatchRecord,
    innings: InningsLayout,
    fielding: FieldingEntry,
    is_captain: bool,
}

/// A home ODI against "Australia" at the MCG unless overridden.
pub fn record(id: u64, date: &str) -> RecordBuilder {
    RecordBuilder {
        match_record: MatchRecord {
            id: MatchId(id),
            player_id: PLAYER,
            format: MatchFormat::Odi,
            level: MatchLevel::International,
            date: date.parse().unwrap(),
            venue: "MCG".to_string(),
            city: "Melbourne".to_string(),
            country: "Australia".to_string(),
            opponent: "Australia".to_string(),
            result: MatchResult::Won,
            home_away: HomeAway::Home,
            series: None,
            conditions: None,
        },
        innings: InningsLayout::Single {
            batting: None,
            bowling: None,
        },
        fielding: FieldingEntry::default(),
        is_captain: false,
    }
}

impl RecordBuilder {
    pub fn format(mut self, format: MatchFormat) -> Self {
        self.match_record.format = format;
        self
    }

    pub fn result(mut self, result: MatchResult) -> Self {
        self.match_record.result = result;
        self
    }

    pub fn opponent(mut self, opponent: &str) -> Self {
        self.match_record.opponent = opponent.to_string();
        self
    }

    pub fn venue(mut self, venue: &str, city: &str, country: &str) -> Self {
        self.match_record.venue = venue.to_string();
        self.match_record.city = city.to_string();
        self.match_record.country = country.to_string();
        self
    }

    pub fn home_away(mut self, home_away: HomeAway) -> Self {
        self.match_record.home_away = home_away;
        self
    }

    pub fn captain(mut self) -> Self {
        self.is_captain = true;
        self
    }

    pub fn fielding(mut self, catches: u32, run_outs: u32, stumpings: u32) -> Self {
        self.fielding = FieldingEntry {
            catches,
            run_outs,
            stumpings,
        };
        self
    }

    pub fn single(mut self, batting: Option<BattingEntry>, bowling: Option<BowlingEntry>) -> Self {
        self.innings = InningsLayout::Single { batting, bowling };
        self
    }

    pub fn multi(
        mut self,
        batting: [Option<BattingEntry>; 2],
        bowling: [Option<BowlingEntry>; 2],
    ) -> Self {
        let [first_batting, second_batting] = batting;
        let [first_bowling, second_bowling] = bowling;
        self.innings = InningsLayout::Multi {
            first_batting,
            second_batting,
            first_bowling,
            second_bowling,
        };
        self
    }

    pub fn build(self) -> PerformanceRecord {
        PerformanceRecord {
            match_record: self.match_record,
            performance: Performance {
                innings: self.innings,
                fielding: self.fielding,
                is_captain: self.is_captain,
                is_wicketkeeper: false,
            },
        }
    }
}
