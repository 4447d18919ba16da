//! Recalculate command implementation

use crate::{
    cli::types::Category,
    storage::{StatsDatabase, StoredSnapshot},
    PlayerId, Result,
};

use super::fmt_rate;

/// Handle `recalculate`: rebuild one category (or everything) and store it
pub fn handle_recalculate(
    db: &mut StatsDatabase,
    player_id: PlayerId,
    category: Category,
) -> Result<StoredSnapshot> {
    let stored = db.refresh_snapshot(player_id, category)?;
    let career = &stored.snapshot.career.stats;

    println!(
        "✓ Recalculated {} for player {} from {} matches",
        category, player_id, stored.match_count
    );
    println!(
        "  {} runs at {}, {} wickets at {}",
        career.batting.runs,
        fmt_rate(career.batting.average),
        career.bowling.wickets,
        fmt_rate(career.bowling.average)
    );
    Ok(stored)
}
