//! Command implementations for the cricket statistics CLI

pub mod matches;
pub mod player;
pub mod recalculate;
pub mod stats;


use std::path::PathBuf;

use crate::{
    core::default_database_path, error::StatsError, storage::StatsDatabase, PlayerId, Result,
    DB_PATH_ENV_VAR, PLAYER_ID_ENV_VAR,
};

/// Resolve the database path from the flag, then the environment, then the data dir
pub fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    match db.or_else(|| {
        std::env::var_os(DB_PATH_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }) {
        Some(path) => Ok(path),
        None => default_database_path(),
    }
}

/// Resolve the player from the flag, then the environment, then the active player
pub fn resolve_player_id(db: &StatsDatabase, player_id: Option<PlayerId>) -> Result<PlayerId> {
    resolve_player_id_with(db, player_id, std::env::var(PLAYER_ID_ENV_VAR).ok())
}

fn resolve_player_id_with(
    db: &StatsDatabase,
    player_id: Option<PlayerId>,
    env_value: Option<String>,
) -> Result<PlayerId> {
    if let Some(id) = player_id.or_else(|| env_value.and_then(|s| s.parse::<PlayerId>().ok())) {
        return Ok(id);
    }
    db.active_player()?.ok_or_else(|| StatsError::MissingPlayerId {
        env_var: PLAYER_ID_ENV_VAR.to_string(),
    })
}

/// Format an optional rate, `-` when undefined
pub(crate) fn fmt_rate(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}
