//! CLI argument definitions and parsing.

pub mod types;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use types::{Category, MatchId, PlayerId, PlayerRole, StatsView};

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Register a player. The first player added becomes the active one.
    Add {
        /// Full name.
        name: String,

        /// batsman, bowler, all_rounder or wicket_keeper.
        #[clap(long, short)]
        role: PlayerRole,

        /// Date of birth (YYYY-MM-DD).
        #[clap(long)]
        date_of_birth: Option<NaiveDate>,

        /// e.g. "right-hand bat".
        #[clap(long)]
        batting_style: Option<String>,

        /// e.g. "left-arm orthodox".
        #[clap(long)]
        bowling_style: Option<String>,

        /// First match date (YYYY-MM-DD).
        #[clap(long)]
        career_start: Option<NaiveDate>,

        /// Last match date (YYYY-MM-DD), if retired.
        #[clap(long)]
        career_end: Option<NaiveDate>,

        /// Make this the active player.
        #[clap(long)]
        activate: bool,
    },

    /// List registered players.
    List {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Make a player the default for every other command.
    Activate {
        /// ID of the player to activate.
        id: PlayerId,
    },
}

#[derive(Debug, Subcommand)]
pub enum MatchCmd {
    /// Add a match from a JSON file: `{ "match": {...}, "performance": {...} }`.
    Add {
        /// Path to the submission file.
        #[clap(long, short)]
        file: PathBuf,

        /// Refresh the stored analytics right away.
        #[clap(long)]
        recalculate: bool,
    },

    /// List the player's matches in date order.
    List {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show one match with its derived fields.
    Show {
        match_id: MatchId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Delete a match and its performance.
    Delete {
        match_id: MatchId,

        /// Refresh the stored analytics right away.
        #[clap(long)]
        recalculate: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "cricket-stats", about = "Personal cricket statistics tracker")]
pub struct CricketStats {
    /// Database file (or set `CRICKET_STATS_DB`).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Player ID (or set `CRICKET_STATS_PLAYER_ID`). Defaults to the active player.
    #[clap(long, short, global = true)]
    pub player_id: Option<PlayerId>,

    /// Log debug detail to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage players
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },

    /// Add, list, show and delete matches
    Match {
        #[clap(subcommand)]
        cmd: MatchCmd,
    },

    /// Recompute the analytics snapshot from stored matches
    Recalculate {
        /// Which section to refresh; the rest is kept from the stored snapshot.
        #[clap(long, short, value_enum, default_value_t = Category::All)]
        category: Category,
    },

    /// Print one view of the player's statistics
    Stats {
        #[clap(value_enum)]
        view: StatsView,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
