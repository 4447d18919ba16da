//! Stored analytics snapshots, one per player

use super::{
    models::{MatchFingerprint, StoredSnapshot},
    queries::unix_now,
    schema::StatsDatabase,
};
use crate::engine::{recalculate_category, AnalyticsSnapshot, Category};
use crate::error::Result;
use crate::{MatchId, PlayerId};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

impl StatsDatabase {
    /// Replace the player's stored snapshot.
    ///
    /// The old row is deleted and the new one inserted in a single
    /// transaction, so readers see either the previous snapshot or this one.
    pub fn store_snapshot(
        &mut self,
        snapshot: &AnalyticsSnapshot,
        fingerprint: MatchFingerprint,
    ) -> Result<StoredSnapshot> {
        let json = serde_json::to_string(snapshot)?;
        let computed_at = unix_now()?;
        let player_id = snapshot.player_id;

        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM analytics_snapshots WHERE player_id = ?",
            params![player_id.as_u64()],
        )?;
        tx.execute(
            "INSERT INTO analytics_snapshots
             (player_id, snapshot, match_count, last_match_id, computed_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                player_id.as_u64(),
                json,
                fingerprint.match_count,
                fingerprint.last_match_id.map(|id| id.as_u64()),
                computed_at
            ],
        )?;
        tx.commit()?;

        let stored = StoredSnapshot {
            snapshot: snapshot.clone(),
            match_count: fingerprint.match_count,
            last_match_id: fingerprint.last_match_id,
            computed_at,
        };
        self.cache.put(stored.clone());
        Ok(stored)
    }

    /// The player's most recently stored snapshot, if one exists
    pub fn latest_snapshot(&self, player_id: PlayerId) -> Result<Option<StoredSnapshot>> {
        if let Some(cached) = self.cache.get(player_id) {
            debug!(%player_id, "Snapshot cache hit");
            return Ok(Some(cached));
        }

        let row = self
            .conn
            .query_row(
                "SELECT snapshot, match_count, last_match_id, computed_at
                 FROM analytics_snapshots WHERE player_id = ?",
                params![player_id.as_u64()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, Option<u64>>(2)?,
                        row.get::<_, u64>(3)?,
                    ))
                },
            )
            .optional()?;
        let Some((json, match_count, last_match_id, computed_at)) = row else {
            return Ok(None);
        };

        let stored = StoredSnapshot {
            snapshot: serde_json::from_str(&json)?,
            match_count,
            last_match_id: last_match_id.map(MatchId::new),
            computed_at,
        };
        let (cached, capacity) = self.cache.memory_stats();
        debug!(%player_id, cached, capacity, "Snapshot loaded from database");
        self.cache.put(stored.clone());
        Ok(Some(stored))
    }

    /// Whether `stored` was computed from exactly the player's current matches
    pub fn snapshot_is_current(&self, stored: &StoredSnapshot) -> Result<bool> {
        let current = self.match_fingerprint(stored.snapshot.player_id)?;
        Ok(stored.fingerprint() == current)
    }

    /// Recompute `category` from the player's stored matches and store the result
    pub fn refresh_snapshot(
        &mut self,
        player_id: PlayerId,
        category: Category,
    ) -> Result<StoredSnapshot> {
        let records = self.load_records(player_id)?;
        let previous = match category {
            Category::All => None,
            _ => self.latest_snapshot(player_id)?,
        };

        let snapshot = recalculate_category(
            previous.as_ref().map(|p| &p.snapshot),
            player_id,
            &records,
            category,
        );
        let fingerprint = MatchFingerprint {
            match_count: records.len() as u32,
            last_match_id: records.iter().map(|r| r.match_id()).max(),
        };
        let stored = self.store_snapshot(&snapshot, fingerprint)?;

        info!(
            %player_id,
            %category,
            matches = records.len(),
            runs = snapshot.career.stats.batting.runs,
            wickets = snapshot.career.stats.bowling.wickets,
            "Analytics snapshot stored"
        );
        Ok(stored)
    }
}
