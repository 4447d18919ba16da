//! Cricket Statistics Library
//!
//! A personal cricket statistics tracker: record match performances, derive
//! per-innings figures and roll them up into career, format, year, opponent,
//! venue and home/away breakdowns.
//!
//! ## Features
//!
//! - **Validation**: submissions are checked field by field (overs notation,
//!   innings layout per format, boundary runs, wicket limits)
//! - **Derived Fields**: strike rate, economy, milestones and wicket hauls per innings
//! - **Rollups**: one reduction shared by the career total and every breakdown
//! - **Milestones**: conversion rates and a dismissal histogram
//! - **Database Storage**: SQLite store of raw input, derived fields and the
//!   latest analytics snapshot per player
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cricket_stats::{engine::MatchSubmission, storage::StatsDatabase, cli::types::PlayerRole};
//! use cricket_stats::storage::NewPlayer;
//!
//! # fn example(json: &str) -> cricket_stats::Result<()> {
//! let mut db = StatsDatabase::new_in_memory()?;
//! let player_id = db.add_player(&NewPlayer::new("Jane Doe", PlayerRole::AllRounder))?;
//!
//! let submission: MatchSubmission = serde_json::from_str(json)?;
//! db.insert_match(player_id, &submission)?;
//!
//! let stored = db.refresh_snapshot(player_id, Default::default())?;
//! println!("{} career runs", stored.snapshot.career.stats.batting.runs);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export CRICKET_STATS_DB=~/cricket/stats.db
//! export CRICKET_STATS_PLAYER_ID=1
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod engine;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{Category, DismissalType, MatchFormat, MatchId, PlayerId, StatsView};
pub use engine::{recalculate, recalculate_category, AnalyticsSnapshot, PerformanceRecord};
pub use error::{Result, StatsError};

pub const PLAYER_ID_ENV_VAR: &str = "CRICKET_STATS_PLAYER_ID";
pub const DB_PATH_ENV_VAR: &str = "CRICKET_STATS_DB";
