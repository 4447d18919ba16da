//! Player management commands

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    cli::types::PlayerRole,
    storage::{NewPlayer, Player, StatsDatabase},
    PlayerId, Result,
};

/// Parameters for `player add`
#[derive(Debug)]
pub struct PlayerAddParams {
    pub name: String,
    pub role: PlayerRole,
    pub date_of_birth: Option<NaiveDate>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub career_start: Option<NaiveDate>,
    pub career_end: Option<NaiveDate>,
    pub activate: bool,
}

/// Handle `player add`; the first player registered becomes active
pub fn handle_player_add(db: &mut StatsDatabase, params: PlayerAddParams) -> Result<PlayerId> {
    let first_player = db.list_players()?.is_empty();
    let player_id = db.add_player(&NewPlayer {
        name: params.name,
        date_of_birth: params.date_of_birth,
        role: params.role,
        batting_style: params.batting_style,
        bowling_style: params.bowling_style,
        career_start: params.career_start,
        career_end: params.career_end,
    })?;

    if params.activate || first_player {
        debug!(%player_id, first_player, "Activating new player");
        db.set_active_player(player_id)?;
    }

    let player = db.get_player(player_id)?;
    println!("✓ Added player {} (id {})", player.name, player_id);
    if player.active {
        println!("  {} is now the active player", player.name);
    }
    Ok(player_id)
}

/// One text line per player
pub fn format_player(player: &Player) -> String {
    let mut line = format!(
        "{:>4}  {:<24} {:<14}",
        player.player_id.as_u64(),
        player.name,
        player.role.as_str()
    );
    if let Some(start) = player.career_start {
        let end = player
            .career_end
            .map_or_else(|| "present".to_string(), |d| d.to_string());
        line.push_str(&format!(" {} to {}", start, end));
    }
    if player.active {
        line.push_str("  [active]");
    }
    line
}

/// Handle `player list`
pub fn handle_player_list(db: &StatsDatabase, as_json: bool) -> Result<()> {
    let players = db.list_players()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&players)?);
    } else if players.is_empty() {
        println!("No players yet. Add one with `player add`.");
    } else {
        for player in &players {
            println!("{}", format_player(player));
        }
    }
    Ok(())
}

/// Handle `player activate`
pub fn handle_player_activate(db: &mut StatsDatabase, player_id: PlayerId) -> Result<()> {
    db.set_active_player(player_id)?;
    let player = db.get_player(player_id)?;
    println!("✓ {} is now the active player", player.name);
    Ok(())
}
