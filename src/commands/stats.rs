//! Stats command: print one view of the analytics snapshot as text or JSON

use tracing::warn;

use crate::{
    cli::types::{DismissalType, HomeAway, StatsView},
    engine::{
        derive::percentage,
        recalculate,
        rollup::{BestBowling, HighestScore},
        AnalyticsSnapshot, StatLine,
    },
    storage::StatsDatabase,
    PlayerId, Result,
};

use super::fmt_rate;

/// The stored snapshot, or one computed on the fly when none has been stored
pub fn load_snapshot(db: &StatsDatabase, player_id: PlayerId) -> Result<AnalyticsSnapshot> {
    match db.latest_snapshot(player_id)? {
        Some(stored) => {
            if !db.snapshot_is_current(&stored)? {
                warn!(
                    %player_id,
                    matches = stored.match_count,
                    last_match = ?stored.last_match_id,
                    "Stored snapshot is stale, run `recalculate` to refresh it"
                );
            }
            Ok(stored.snapshot)
        }
        None => {
            warn!(%player_id, "No stored snapshot, computing on the fly");
            let records = db.load_records(player_id)?;
            Ok(recalculate(player_id, &records))
        }
    }
}

fn fmt_highest(score: Option<&HighestScore>) -> String {
    score.map_or_else(
        || "-".to_string(),
        |s| format!("{}{}", s.runs, if s.not_out { "*" } else { "" }),
    )
}

fn fmt_best(figures: Option<&BestBowling>) -> String {
    figures.map_or_else(|| "-".to_string(), |b| format!("{}/{}", b.wickets, b.runs))
}

/// One summary row for a breakdown table
pub fn format_line(label: &str, line: &StatLine) -> String {
    let batting = &line.batting;
    let bowling = &line.bowling;
    format!(
        "{:<32} M {:>3}  Runs {:>5}  HS {:>4}  Avg {:>6}  SR {:>6}  Wkts {:>4}  BB {:>5}  Avg {:>6}  Econ {:>5.2}  Win% {:>5.1}",
        label,
        line.matches,
        batting.runs,
        fmt_highest(batting.highest_score.as_ref()),
        fmt_rate(batting.average),
        format!("{:.2}", batting.strike_rate),
        bowling.wickets,
        fmt_best(bowling.best_figures.as_ref()),
        fmt_rate(bowling.average),
        bowling.economy,
        line.results.win_percentage
    )
}

fn career_lines(snapshot: &AnalyticsSnapshot) -> Vec<String> {
    let career = &snapshot.career;
    let stats = &career.stats;
    let (batting, bowling, fielding, results) =
        (&stats.batting, &stats.bowling, &stats.fielding, &stats.results);

    let span = match (career.first_match, career.last_match) {
        (Some(first), Some(last)) => format!("{} to {}", first, last),
        _ => "no matches yet".to_string(),
    };

    vec![
        format!(
            "Career: {}, {} matches ({} as captain, {} as wicketkeeper)",
            span, stats.matches, career.captain_matches, career.wicketkeeper_matches
        ),
        format!(
            "Batting: {} innings, {} not outs, {} runs, HS {}, avg {}, SR {:.2}, 100s {}, 50s {}, ducks {}, 4s {}, 6s {}",
            batting.innings,
            batting.not_outs,
            batting.runs,
            fmt_highest(batting.highest_score.as_ref()),
            fmt_rate(batting.average),
            batting.strike_rate,
            batting.centuries,
            batting.fifties,
            batting.ducks,
            batting.fours,
            batting.sixes
        ),
        format!(
            "Bowling: {} overs, {} maidens, {} runs, {} wickets, best {}, avg {}, econ {:.2}, SR {}, 5w {}, 10w {}",
            bowling.overs,
            bowling.maidens,
            bowling.runs_conceded,
            bowling.wickets,
            fmt_best(bowling.best_figures.as_ref()),
            fmt_rate(bowling.average),
            bowling.economy,
            fmt_rate(bowling.strike_rate),
            bowling.five_wicket_hauls,
            bowling.ten_wicket_matches
        ),
        format!(
            "Fielding: {} catches, {} run outs, {} stumpings",
            fielding.catches, fielding.run_outs, fielding.stumpings
        ),
        format!(
            "Results: won {}, lost {}, drawn {}, tied {}, no result {}, win {:.1}%",
            results.won,
            results.lost,
            results.drawn,
            results.tied,
            results.no_result,
            results.win_percentage
        ),
    ]
}

/// Busiest partitions first; ties keep their key order
fn by_matches_desc<'a, T>(rows: &'a [T], stats: impl Fn(&T) -> &StatLine) -> Vec<&'a T> {
    let mut sorted: Vec<&T> = rows.iter().collect();
    sorted.sort_by(|a, b| stats(b).matches.cmp(&stats(a).matches));
    sorted
}

/// Text rendering of one view
pub fn render_view(snapshot: &AnalyticsSnapshot, view: StatsView) -> Vec<String> {
    match view {
        StatsView::Career => career_lines(snapshot),
        StatsView::Formats => snapshot
            .formats
            .iter()
            .map(|f| format_line(f.format.as_str(), &f.stats))
            .collect(),
        StatsView::Years => snapshot
            .years
            .iter()
            .map(|y| format_line(&y.year.to_string(), &y.stats))
            .collect(),
        StatsView::Opponents => by_matches_desc(&snapshot.opponents, |o| &o.stats)
            .into_iter()
            .map(|o| format_line(&o.opponent, &o.stats))
            .collect(),
        StatsView::Venues => by_matches_desc(&snapshot.venues, |v| &v.stats)
            .into_iter()
            .map(|v| {
                let label = if v.city.is_empty() {
                    v.venue.clone()
                } else {
                    format!("{}, {}", v.venue, v.city)
                };
                format_line(&label, &v.stats)
            })
            .collect(),
        StatsView::HomeAway => HomeAway::ALL
            .iter()
            .map(|h| format_line(h.as_str(), snapshot.home_away.get(*h)))
            .collect(),
        StatsView::Dismissals => {
            let histogram = &snapshot.dismissals;
            let total = histogram.total();
            DismissalType::ALL
                .iter()
                .map(|kind| {
                    let count = histogram.get(*kind);
                    format!(
                        "{:<13} {:>4}  {:>5.1}%",
                        kind.as_str(),
                        count,
                        percentage(count as f64, total as f64).unwrap_or(0.0)
                    )
                })
                .collect()
        }
        StatsView::Conversions => {
            let c = &snapshot.conversions;
            vec![
                format!(
                    "Starts (20+): {}, 30+: {}, 50+: {}, 100+: {}",
                    c.starts, c.thirties, c.fifties_plus, c.hundreds
                ),
                format!("Start to 30:  {}%", fmt_rate(c.start_to_thirty)),
                format!("30 to 50:     {}%", fmt_rate(c.thirty_to_fifty)),
                format!("50 to 100:    {}%", fmt_rate(c.fifty_to_hundred)),
            ]
        }
    }
}

/// Pretty JSON of the section behind one view
pub fn view_json(snapshot: &AnalyticsSnapshot, view: StatsView) -> Result<String> {
    let json = match view {
        StatsView::Career => serde_json::to_string_pretty(&snapshot.career)?,
        StatsView::Formats => serde_json::to_string_pretty(&snapshot.formats)?,
        StatsView::Years => serde_json::to_string_pretty(&snapshot.years)?,
        StatsView::Opponents => serde_json::to_string_pretty(&snapshot.opponents)?,
        StatsView::Venues => serde_json::to_string_pretty(&snapshot.venues)?,
        StatsView::HomeAway => serde_json::to_string_pretty(&snapshot.home_away)?,
        StatsView::Dismissals => serde_json::to_string_pretty(&snapshot.dismissals)?,
        StatsView::Conversions => serde_json::to_string_pretty(&snapshot.conversions)?,
    };
    Ok(json)
}

/// Handle `stats`
pub fn handle_stats(
    db: &StatsDatabase,
    player_id: PlayerId,
    view: StatsView,
    as_json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(db, player_id)?;

    if as_json {
        println!("{}", view_json(&snapshot, view)?);
    } else {
        let lines = render_view(&snapshot, view);
        if lines.is_empty() {
            println!("No {} data yet", view);
        }
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}
