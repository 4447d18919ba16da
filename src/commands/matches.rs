//! Match commands: add from a JSON submission, list, show and delete

use std::{fs, path::Path};

use tracing::debug;

use crate::{
    cli::types::Category,
    engine::{
        derive::{BattingDerived, BowlingDerived},
        input::{BattingInput, BowlingInput},
        MatchSubmission, Overs,
    },
    storage::{MatchSummary, StatsDatabase, StoredMatch},
    MatchId, PlayerId, Result,
};

/// Read a `{ "match": ..., "performance": ... }` submission from disk
pub fn read_submission(path: &Path) -> Result<MatchSubmission> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Handle `match add`
pub fn handle_match_add(
    db: &mut StatsDatabase,
    player_id: PlayerId,
    file: &Path,
    recalculate: bool,
) -> Result<MatchId> {
    debug!(file = %file.display(), "Reading submission");
    let submission = read_submission(file)?;
    let match_id = db.insert_match(player_id, &submission)?;

    let input = &submission.match_input;
    println!(
        "✓ Stored match {}: {} vs {} on {}",
        match_id, input.format, input.opponent.trim(), input.date
    );

    if recalculate {
        let stored = db.refresh_snapshot(player_id, Category::All)?;
        println!(
            "✓ Analytics recalculated from {} matches",
            stored.match_count
        );
    } else {
        println!("Run `recalculate` to refresh the stored analytics.");
    }
    Ok(match_id)
}

pub fn format_match_summary(summary: &MatchSummary) -> String {
    format!(
        "{:>5}  {}  {:<13} vs {:<20} {:<9} {:>4} runs {:>2} wkts",
        summary.match_id.as_u64(),
        summary.date,
        summary.format.as_str(),
        summary.opponent,
        summary.result.as_str(),
        summary.runs,
        summary.wickets
    )
}

/// Handle `match list`
pub fn handle_match_list(db: &StatsDatabase, player_id: PlayerId, as_json: bool) -> Result<()> {
    let matches = db.list_matches(player_id)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else if matches.is_empty() {
        println!("No matches recorded for player {}", player_id);
    } else {
        for summary in &matches {
            println!("{}", format_match_summary(summary));
        }
    }
    Ok(())
}

fn format_batting(input: &BattingInput, derived: &BattingDerived) -> String {
    let dismissal = input
        .dismissal_type
        .map_or("", |d| d.as_str())
        .replace('_', " ");
    format!(
        "{}{} ({}b, {}x4, {}x6) {}  SR {:.2}",
        input.runs,
        if derived.is_not_out { "*" } else { "" },
        input.balls_faced,
        input.fours,
        input.sixes,
        dismissal,
        derived.strike_rate
    )
}

fn format_bowling(input: &BowlingInput, derived: &BowlingDerived) -> String {
    format!(
        "{}-{}-{}-{}  Econ {:.2}",
        Overs::from_balls(derived.balls_bowled),
        input.maidens,
        input.runs_conceded,
        input.wickets,
        derived.economy
    )
}

/// Multi-line text rendering of one stored match
pub fn format_match(stored: &StoredMatch) -> Vec<String> {
    let record = &stored.match_record;
    let performance = &stored.performance;
    let mut lines = vec![
        format!(
            "Match {}: {} vs {}, {} ({}, {})",
            record.id, record.format, record.opponent, record.date, record.home_away, record.result
        ),
        format!("Venue: {}, {}, {}", record.venue, record.city, record.country),
    ];
    if let Some(series) = &record.series {
        lines.push(format!("Series: {}", series));
    }

    let batting_slots = [
        ("Batting", &performance.batting),
        ("1st innings batting", &performance.first_innings_batting),
        ("2nd innings batting", &performance.second_innings_batting),
    ];
    let mut batted = stored.derived.batting.iter();
    for (label, slot) in batting_slots {
        let Some(input) = slot else { continue };
        if input.did_not_bat {
            lines.push(format!("{}: did not bat", label));
        } else if let Some(derived) = batted.next() {
            lines.push(format!("{}: {}", label, format_batting(input, derived)));
        }
    }

    let bowling_slots = [
        ("Bowling", &performance.bowling),
        ("1st innings bowling", &performance.first_innings_bowling),
        ("2nd innings bowling", &performance.second_innings_bowling),
    ];
    let mut bowled = stored.derived.bowling.iter();
    for (label, slot) in bowling_slots {
        let Some(input) = slot else { continue };
        if input.did_not_bowl {
            lines.push(format!("{}: did not bowl", label));
        } else if let Some(derived) = bowled.next() {
            lines.push(format!("{}: {}", label, format_bowling(input, derived)));
        }
    }

    let fielding = &performance.fielding;
    lines.push(format!(
        "Fielding: {} catches, {} run outs, {} stumpings",
        fielding.catches, fielding.run_outs, fielding.stumpings
    ));
    if performance.is_captain {
        lines.push("Captain".to_string());
    }
    if performance.is_wicketkeeper {
        lines.push("Wicketkeeper".to_string());
    }
    lines
}

/// Handle `match show`
pub fn handle_match_show(db: &StatsDatabase, match_id: MatchId, as_json: bool) -> Result<()> {
    let stored = db.get_match(match_id)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    } else {
        for line in format_match(&stored) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Handle `match delete`
pub fn handle_match_delete(
    db: &mut StatsDatabase,
    match_id: MatchId,
    recalculate: bool,
) -> Result<PlayerId> {
    let player_id = db.delete_match(match_id)?;
    println!("✓ Deleted match {}", match_id);

    if recalculate {
        let stored = db.refresh_snapshot(player_id, Category::All)?;
        println!(
            "✓ Analytics recalculated from {} matches",
            stored.match_count
        );
    } else {
        println!("Run `recalculate` to refresh the stored analytics.");
    }
    Ok(player_id)
}
