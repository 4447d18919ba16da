//! Raw submission shapes and their validation.
//!
//! Counts arrive as signed integers so a negative value can be reported as a
//! validation error naming the field, instead of an opaque parse failure.
//! Enum fields (format, result, dismissal type, ...) are rejected by serde
//! when they hold an unknown string.

use crate::cli::types::{
    DismissalType, HomeAway, MatchFormat, MatchId, MatchLevel, MatchResult, PlayerId,
};
use crate::engine::overs::Overs;
use crate::engine::types::{
    BattingEntry, BowlingEntry, Conditions, FieldingEntry, InningsLayout, MatchRecord,
    Performance,
};
use crate::error::{Result, StatsError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_WICKETS_PER_INNINGS: u32 = 10;
pub const MAX_BATTING_POSITION: i64 = 11;

/// A complete submission: one match and the player's performance in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSubmission {
    #[serde(rename = "match")]
    pub match_input: MatchInput,
    #[serde(default)]
    pub performance: PerformanceInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInput {
    pub format: MatchFormat,
    pub level: MatchLevel,
    pub date: NaiveDate,
    pub venue: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub opponent: String,
    pub result: MatchResult,
    pub home_away: HomeAway,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingInput {
    #[serde(default)]
    pub did_not_bat: bool,
    #[serde(default)]
    pub runs: i64,
    #[serde(default)]
    pub balls_faced: i64,
    #[serde(default)]
    pub fours: i64,
    #[serde(default)]
    pub sixes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissal_type: Option<DismissalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingInput {
    #[serde(default)]
    pub did_not_bowl: bool,
    #[serde(default)]
    pub overs: f64,
    #[serde(default)]
    pub maidens: i64,
    #[serde(default)]
    pub runs_conceded: i64,
    #[serde(default)]
    pub wickets: i64,
    #[serde(default)]
    pub wides: i64,
    #[serde(default)]
    pub no_balls: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldingInput {
    #[serde(default)]
    pub catches: i64,
    #[serde(default)]
    pub run_outs: i64,
    #[serde(default)]
    pub stumpings: i64,
}

/// Performance as submitted. Single-innings formats use `batting`/`bowling`;
/// Test and First-class use the `first*`/`second*` slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batting: Option<BattingInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowling: Option<BowlingInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_innings_batting: Option<BattingInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_innings_batting: Option<BattingInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_innings_bowling: Option<BowlingInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_innings_bowling: Option<BowlingInput>,
    #[serde(default)]
    pub fielding: FieldingInput,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_wicketkeeper: bool,
}

fn count(context: &str, field: &str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(StatsError::validation(
            context,
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    u32::try_from(value)
        .map_err(|_| StatsError::validation(context, field, format!("{} is out of range", value)))
}

fn required_text(context: &str, field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StatsError::validation(context, field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Validate the match half of a submission.
pub fn validate_match(
    input: &MatchInput,
    id: MatchId,
    player_id: PlayerId,
) -> Result<MatchRecord> {
    let context = "match";
    Ok(MatchRecord {
        id,
        player_id,
        format: input.format,
        level: input.level,
        date: input.date,
        venue: required_text(context, "venue", &input.venue)?,
        city: input.city.trim().to_string(),
        country: input.country.trim().to_string(),
        opponent: required_text(context, "opponent", &input.opponent)?,
        result: input.result,
        home_away: input.home_away,
        series: input
            .series
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        conditions: input.conditions.clone(),
    })
}

pub fn validate_batting(context: &str, input: &BattingInput) -> Result<BattingEntry> {
    if input.did_not_bat {
        return Ok(BattingEntry::did_not_bat());
    }

    let runs = count(context, "runs", input.runs)?;
    let balls_faced = count(context, "ballsFaced", input.balls_faced)?;
    let fours = count(context, "fours", input.fours)?;
    let sixes = count(context, "sixes", input.sixes)?;

    let boundary_runs = u64::from(fours) * 4 + u64::from(sixes) * 6;
    if boundary_runs > u64::from(runs) {
        return Err(StatsError::validation(
            context,
            "runs",
            format!("{} is less than the {} runs scored in boundaries", runs, boundary_runs),
        ));
    }

    let dismissal_type = input.dismissal_type.ok_or_else(|| {
        StatsError::validation(
            context,
            "dismissalType",
            "is required for an innings that was batted",
        )
    })?;

    let position = match input.position {
        Some(p) if !(1..=MAX_BATTING_POSITION).contains(&p) => {
            return Err(StatsError::validation(
                context,
                "position",
                format!("must be between 1 and {}, got {}", MAX_BATTING_POSITION, p),
            ))
        }
        Some(p) => Some(p as u8),
        None => None,
    };

    Ok(BattingEntry {
        did_not_bat: false,
        runs,
        balls_faced,
        fours,
        sixes,
        dismissal_type: Some(dismissal_type),
        bowler: input.bowler.clone(),
        fielder: input.fielder.clone(),
        position,
    })
}

pub fn validate_bowling(context: &str, input: &BowlingInput) -> Result<BowlingEntry> {
    if input.did_not_bowl {
        return Ok(BowlingEntry::did_not_bowl());
    }

    let overs = Overs::from_notation(input.overs).map_err(|e| e.with_context(context))?;
    let maidens = count(context, "maidens", input.maidens)?;
    let runs_conceded = count(context, "runsConceded", input.runs_conceded)?;
    let wickets = count(context, "wickets", input.wickets)?;
    let wides = count(context, "wides", input.wides)?;
    let no_balls = count(context, "noBalls", input.no_balls)?;

    if wickets > MAX_WICKETS_PER_INNINGS {
        return Err(StatsError::validation(
            context,
            "wickets",
            format!("at most {} per innings, got {}", MAX_WICKETS_PER_INNINGS, wickets),
        ));
    }
    if maidens > overs.completed_overs() {
        return Err(StatsError::validation(
            context,
            "maidens",
            format!("{} exceeds the {} completed overs", maidens, overs.completed_overs()),
        ));
    }

    Ok(BowlingEntry {
        did_not_bowl: false,
        overs,
        maidens,
        runs_conceded,
        wickets,
        wides,
        no_balls,
    })
}

pub fn validate_fielding(input: &FieldingInput) -> Result<FieldingEntry> {
    let context = "fielding";
    Ok(FieldingEntry {
        catches: count(context, "catches", input.catches)?,
        run_outs: count(context, "runOuts", input.run_outs)?,
        stumpings: count(context, "stumpings", input.stumpings)?,
    })
}

fn reject_slot<T>(slot: &Option<T>, field: &str, format: MatchFormat) -> Result<()> {
    if slot.is_some() {
        return Err(StatsError::validation(
            "performance",
            field,
            format!("is not used by {} matches", format),
        ));
    }
    Ok(())
}

/// Validate the performance half of a submission against the match format.
pub fn validate_performance(format: MatchFormat, input: &PerformanceInput) -> Result<Performance> {
    let innings = if format.is_multi_innings() {
        reject_slot(&input.batting, "batting", format)?;
        reject_slot(&input.bowling, "bowling", format)?;
        InningsLayout::Multi {
            first_batting: input
                .first_innings_batting
                .as_ref()
                .map(|b| validate_batting("first innings batting", b))
                .transpose()?,
            second_batting: input
                .second_innings_batting
                .as_ref()
                .map(|b| validate_batting("second innings batting", b))
                .transpose()?,
            first_bowling: input
                .first_innings_bowling
                .as_ref()
                .map(|b| validate_bowling("first innings bowling", b))
                .transpose()?,
            second_bowling: input
                .second_innings_bowling
                .as_ref()
                .map(|b| validate_bowling("second innings bowling", b))
                .transpose()?,
        }
    } else {
        reject_slot(&input.first_innings_batting, "firstInningsBatting", format)?;
        reject_slot(&input.second_innings_batting, "secondInningsBatting", format)?;
        reject_slot(&input.first_innings_bowling, "firstInningsBowling", format)?;
        reject_slot(&input.second_innings_bowling, "secondInningsBowling", format)?;
        InningsLayout::Single {
            batting: input
                .batting
                .as_ref()
                .map(|b| validate_batting("batting", b))
                .transpose()?,
            bowling: input
                .bowling
                .as_ref()
                .map(|b| validate_bowling("bowling", b))
                .transpose()?,
        }
    };

    Ok(Performance {
        innings,
        fielding: validate_fielding(&input.fielding)?,
        is_captain: input.is_captain,
        is_wicketkeeper: input.is_wicketkeeper,
    })
}

impl From<&BattingEntry> for BattingInput {
    fn from(entry: &BattingEntry) -> Self {
        if entry.did_not_bat {
            return BattingInput {
                did_not_bat: true,
                ..BattingInput::default()
            };
        }
        BattingInput {
            did_not_bat: false,
            runs: entry.runs.into(),
            balls_faced: entry.balls_faced.into(),
            fours: entry.fours.into(),
            sixes: entry.sixes.into(),
            dismissal_type: entry.dismissal_type,
            bowler: entry.bowler.clone(),
            fielder: entry.fielder.clone(),
            position: entry.position.map(i64::from),
        }
    }
}

impl From<&BowlingEntry> for BowlingInput {
    fn from(entry: &BowlingEntry) -> Self {
        if entry.did_not_bowl {
            return BowlingInput {
                did_not_bowl: true,
                ..BowlingInput::default()
            };
        }
        BowlingInput {
            did_not_bowl: false,
            overs: entry.overs.notation(),
            maidens: entry.maidens.into(),
            runs_conceded: entry.runs_conceded.into(),
            wickets: entry.wickets.into(),
            wides: entry.wides.into(),
            no_balls: entry.no_balls.into(),
        }
    }
}

/// Normalized submission form of a validated performance, used for storage.
impl From<&Performance> for PerformanceInput {
    fn from(performance: &Performance) -> Self {
        let mut input = PerformanceInput {
            fielding: FieldingInput {
                catches: performance.fielding.catches.into(),
                run_outs: performance.fielding.run_outs.into(),
                stumpings: performance.fielding.stumpings.into(),
            },
            is_captain: performance.is_captain,
            is_wicketkeeper: performance.is_wicketkeeper,
            ..PerformanceInput::default()
        };
        match &performance.innings {
            InningsLayout::Single { batting, bowling } => {
                input.batting = batting.as_ref().map(BattingInput::from);
                input.bowling = bowling.as_ref().map(BowlingInput::from);
            }
            InningsLayout::Multi {
                first_batting,
                second_batting,
                first_bowling,
                second_bowling,
            } => {
                input.first_innings_batting = first_batting.as_ref().map(BattingInput::from);
                input.second_innings_batting = second_batting.as_ref().map(BattingInput::from);
                input.first_innings_bowling = first_bowling.as_ref().map(BowlingInput::from);
                input.second_innings_bowling = second_bowling.as_ref().map(BowlingInput::from);
            }
        }
        input
    }
}
