//! Per-performance derived fields.
//!
//! Everything here is a pure function of the raw entries. The write path calls
//! [`derive_fields`] on every save and stores the result beside the raw input;
//! nothing ever mutates a derived value directly.

use crate::engine::overs::Overs;
use crate::engine::types::{BattingEntry, BowlingEntry, FieldingEntry, Performance};
use serde::{Deserialize, Serialize};


pub const FIFTY: u32 = 50;
pub const HUNDRED: u32 = 100;

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator`, rounded, or `None` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(round2(numerator / denominator))
    } else {
        None
    }
}

/// `numerator / denominator * 100`, rounded, or `None` when the denominator is zero.
pub fn percentage(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 {
        Some(round2(numerator / denominator * 100.0))
    } else {
        None
    }
}

/// Runs per over, with overs taken as a true fraction of balls.
pub fn economy_rate(runs_conceded: u32, overs: Overs) -> f64 {
    ratio(runs_conceded as f64, overs.as_fraction()).unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingDerived {
    pub strike_rate: f64,
    pub boundary_runs: u32,
    pub boundary_percentage: f64,
    pub is_not_out: bool,
    pub is_duck: bool,
    pub is_fifty: bool,
    pub is_century: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingDerived {
    pub balls_bowled: u32,
    pub economy: f64,
    /// Unset for a wicketless spell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f64>,
    /// Unset for a wicketless spell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    pub is_three_wicket_haul: bool,
    pub is_four_wicket_haul: bool,
    pub is_five_wicket_haul: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldingDerived {
    pub total_dismissals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTotals {
    pub runs: u32,
    pub balls_faced: u32,
    pub wickets: u32,
    pub overs: Overs,
}

/// All derived values for one performance. `batting` and `bowling` hold one
/// entry per innings actually played, in innings order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedFields {
    pub batting: Vec<BattingDerived>,
    pub bowling: Vec<BowlingDerived>,
    pub fielding: FieldingDerived,
    pub totals: MatchTotals,
}

/// `None` for a did-not-bat entry.
pub fn derive_batting(entry: &BattingEntry) -> Option<BattingDerived> {
    if entry.did_not_bat {
        return None;
    }

    let boundary_runs = entry.fours * 4 + entry.sixes * 6;
    let is_not_out = entry.is_not_out();

    Some(BattingDerived {
        strike_rate: percentage(entry.runs as f64, entry.balls_faced as f64).unwrap_or(0.0),
        boundary_runs,
        boundary_percentage: percentage(boundary_runs as f64, entry.runs as f64).unwrap_or(0.0),
        is_not_out,
        is_duck: entry.runs == 0 && !is_not_out,
        is_fifty: (FIFTY..HUNDRED).contains(&entry.runs),
        is_century: entry.runs >= HUNDRED,
    })
}

/// `None` for a did-not-bowl entry.
pub fn derive_bowling(entry: &BowlingEntry) -> Option<BowlingDerived> {
    if entry.did_not_bowl {
        return None;
    }

    let balls_bowled = entry.overs.balls();
    let (strike_rate, average) = if entry.wickets > 0 {
        (
            ratio(balls_bowled as f64, entry.wickets as f64),
            ratio(entry.runs_conceded as f64, entry.wickets as f64),
        )
    } else {
        (None, None)
    };

    Some(BowlingDerived {
        balls_bowled,
        economy: economy_rate(entry.runs_conceded, entry.overs),
        strike_rate,
        average,
        is_three_wicket_haul: entry.wickets >= 3,
        is_four_wicket_haul: entry.wickets >= 4,
        is_five_wicket_haul: entry.wickets >= 5,
    })
}

pub fn derive_fielding(entry: &FieldingEntry) -> FieldingDerived {
    FieldingDerived {
        total_dismissals: entry
            .catches
            .saturating_add(entry.run_outs)
            .saturating_add(entry.stumpings),
    }
}

/// Recompute every derived field of a performance.
pub fn derive_fields(performance: &Performance) -> DerivedFields {
    let batting: Vec<_> = performance
        .innings
        .batted()
        .filter_map(derive_batting)
        .collect();
    let bowling: Vec<_> = performance
        .innings
        .bowled()
        .filter_map(derive_bowling)
        .collect();

    let totals = MatchTotals {
        runs: performance.innings.batted().map(|b| b.runs).sum(),
        balls_faced: performance.innings.batted().map(|b| b.balls_faced).sum(),
        wickets: performance.innings.bowled().map(|b| b.wickets).sum(),
        overs: performance.innings.bowled().map(|b| b.overs).sum(),
    };

    debug_assert_eq!(
        totals.overs.balls(),
        bowling.iter().map(|b| b.balls_bowled).sum::<u32>()
    );

    DerivedFields {
        batting,
        bowling,
        fielding: derive_fielding(&performance.fielding),
        totals,
    }
}
