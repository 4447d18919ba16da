//! The full analytics snapshot and the recalculation entry points.

use crate::cli::types::PlayerId;
use crate::engine::breakdown::{
    breakdown_with, career_summary, career_summary_with, format_breakdown, home_away_breakdown,
    home_away_breakdown_with, opponent_breakdown, venue_breakdown, yearly_breakdown,
    BreakdownRow, CareerSummary, FormatStats, HomeAwayStats, OpponentStats, VenueStats,
    YearlyStats,
};
use crate::engine::milestones::{
    conversion_rates, dismissal_histogram, ConversionRates, DismissalTypeHistogram,
};
use crate::engine::rollup::StatLine;
use crate::engine::types::{Category, PerformanceRecord};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, warn};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub player_id: PlayerId,
    pub career: CareerSummary,
    pub formats: Vec<FormatStats>,
    pub years: Vec<YearlyStats>,
    pub opponents: Vec<OpponentStats>,
    pub venues: Vec<VenueStats>,
    pub home_away: HomeAwayStats,
    pub dismissals: DismissalTypeHistogram,
    pub conversions: ConversionRates,
}

/// Records in engine order: match date ascending, then match id.
fn in_engine_order(records: &[PerformanceRecord]) -> Cow<'_, [PerformanceRecord]> {
    let key = |r: &PerformanceRecord| (r.match_record.date, r.match_id());
    if records.windows(2).all(|w| key(&w[0]) <= key(&w[1])) {
        Cow::Borrowed(records)
    } else {
        let mut sorted = records.to_vec();
        sorted.sort_by_key(key);
        Cow::Owned(sorted)
    }
}

/// Derive every output from the player's full record set.
///
/// Pure and deterministic: the same records always produce the same
/// snapshot, whatever order they are passed in.
pub fn recalculate(player_id: PlayerId, records: &[PerformanceRecord]) -> AnalyticsSnapshot {
    let records = in_engine_order(records);
    let records = records.as_ref();
    debug!(%player_id, matches = records.len(), "Recalculating analytics");

    AnalyticsSnapshot {
        player_id,
        career: career_summary(player_id, records),
        formats: format_breakdown(records),
        years: yearly_breakdown(records),
        opponents: opponent_breakdown(records),
        venues: venue_breakdown(records),
        home_away: home_away_breakdown(records),
        dismissals: dismissal_histogram(records),
        conversions: conversion_rates(records),
    }
}

/// Refresh one category of a previously computed snapshot.
///
/// Only the requested part is reduced again:
///
/// - `Career` recomputes the career summary and keeps every breakdown from
///   `previous`.
/// - `Batting`, `Bowling` and `Fielding` rebuild the partition lists. A
///   partition that already existed in `previous` keeps its other sections
///   and gets a fresh match count, results and the requested section. A new
///   partition is reduced in full. Dismissals and conversions follow
///   `Batting`.
///
/// Without a usable `previous`, or for `All`, this is [`recalculate`].
pub fn recalculate_category(
    previous: Option<&AnalyticsSnapshot>,
    player_id: PlayerId,
    records: &[PerformanceRecord],
    category: Category,
) -> AnalyticsSnapshot {
    let previous = match previous {
        Some(p) if p.player_id == player_id => p,
        Some(p) => {
            warn!(
                expected = %player_id,
                found = %p.player_id,
                "Previous snapshot belongs to another player, recalculating everything"
            );
            return recalculate(player_id, records);
        }
        None => return recalculate(player_id, records),
    };

    let records = in_engine_order(records);
    let records = records.as_ref();
    debug!(%player_id, %category, matches = records.len(), "Recalculating one category");

    match category {
        Category::All => recalculate(player_id, records),
        Category::Career => AnalyticsSnapshot {
            career: career_summary(player_id, records),
            ..previous.clone()
        },
        Category::Batting | Category::Bowling | Category::Fielding => {
            refresh_section(previous, player_id, records, category)
        }
    }
}

/// Refresh `category` on top of a previous line, or reduce in full when there is none.
fn refresh_line(
    previous: Option<&StatLine>,
    group: &[&PerformanceRecord],
    category: Category,
) -> StatLine {
    match previous {
        Some(previous) => {
            let mut line = previous.clone();
            line.refresh(group, category);
            line
        }
        None => StatLine::from_records(group.iter().copied()),
    }
}

fn refresh_rows<T: BreakdownRow>(
    records: &[PerformanceRecord],
    previous: &[T],
    category: Category,
) -> Vec<T> {
    breakdown_with(records, |key, group| {
        let old = previous.iter().find(|row| row.key() == *key);
        refresh_line(old.map(T::stats), group, category)
    })
}

fn refresh_section(
    previous: &AnalyticsSnapshot,
    player_id: PlayerId,
    records: &[PerformanceRecord],
    category: Category,
) -> AnalyticsSnapshot {
    let all: Vec<&PerformanceRecord> = records.iter().collect();
    let career_stats = refresh_line(Some(&previous.career.stats), &all, category);

    let home_away = home_away_breakdown_with(records, |home_away, group| {
        let old = previous.home_away.get(home_away);
        // An empty previous line is a partition that did not exist yet.
        refresh_line(Some(old).filter(|l| l.matches > 0), group, category)
    });

    let (dismissals, conversions) = if category == Category::Batting {
        (dismissal_histogram(records), conversion_rates(records))
    } else {
        (previous.dismissals.clone(), previous.conversions.clone())
    };

    AnalyticsSnapshot {
        player_id,
        career: career_summary_with(player_id, records, career_stats),
        formats: refresh_rows(records, &previous.formats, category),
        years: refresh_rows(records, &previous.years, category),
        opponents: refresh_rows(records, &previous.opponents, category),
        venues: refresh_rows(records, &previous.venues, category),
        home_away,
        dismissals,
        conversions,
    }
}
