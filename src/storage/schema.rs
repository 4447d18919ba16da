//! Database schema and connection management

use crate::core::{ensure_parent_dir, SnapshotCache};
use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Database connection manager for players, matches and snapshots
pub struct StatsDatabase {
    pub(crate) conn: Connection,
    pub(crate) cache: SnapshotCache,
}

impl StatsDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn new(path: &Path) -> Result<Self> {
        ensure_parent_dir(path)?;
        debug!(path = %path.display(), "Opening database");
        Self::from_connection(Connection::open(path)?)
    }

    /// A throwaway database, used by tests
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // Cascading deletes from matches to performances need this per connection
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        let mut db = Self {
            conn,
            cache: SnapshotCache::default(),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                date_of_birth TEXT,
                role TEXT NOT NULL,
                batting_style TEXT,
                bowling_style TEXT,
                career_start TEXT,
                career_end TEXT,
                active INTEGER NOT NULL DEFAULT 0,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        // At most one active player
        self.conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_single_active_player
             ON players(active) WHERE active = 1",
            [],
        )?;

        // Dates are ISO-8601 text so they sort chronologically
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS matches (
                match_id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id INTEGER NOT NULL,
                format TEXT NOT NULL,
                level TEXT NOT NULL,
                date TEXT NOT NULL,
                venue TEXT NOT NULL,
                city TEXT NOT NULL,
                country TEXT NOT NULL,
                opponent TEXT NOT NULL,
                result TEXT NOT NULL,
                home_away TEXT NOT NULL,
                series TEXT,
                conditions TEXT,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (player_id) REFERENCES players(player_id) ON DELETE CASCADE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_matches_player_date
             ON matches(player_id, date, match_id)",
            [],
        )?;

        // One performance per match: normalized raw input plus derived fields
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS performances (
                match_id INTEGER PRIMARY KEY,
                raw TEXT NOT NULL,
                derived TEXT NOT NULL,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (match_id) REFERENCES matches(match_id) ON DELETE CASCADE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS analytics_snapshots (
                player_id INTEGER PRIMARY KEY,
                snapshot TEXT NOT NULL,
                match_count INTEGER NOT NULL,
                last_match_id INTEGER,
                computed_at INTEGER NOT NULL,
                FOREIGN KEY (player_id) REFERENCES players(player_id) ON DELETE CASCADE
            )",
            [],
        )?;

        Ok(())
    }
}
