//! Player and match queries

use super::{models::*, schema::StatsDatabase};
use crate::engine::input::{MatchInput, PerformanceInput};
use crate::engine::types::Conditions;
use crate::engine::{
    derive_fields, validate_match, validate_performance, DerivedFields, MatchRecord,
    MatchSubmission, Performance, PerformanceRecord,
};
use crate::error::{Result, StatsError};
use crate::{MatchId, PlayerId};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

pub(crate) fn unix_now() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(text, "%Y-%m-%d")?)
}

fn parse_optional_date(text: Option<&str>) -> Result<Option<NaiveDate>> {
    text.map(parse_date).transpose()
}

const PLAYER_COLUMNS: &str = "player_id, name, date_of_birth, role, batting_style, \
     bowling_style, career_start, career_end, active";

/// A `players` row before its text columns are parsed
struct PlayerRow {
    player_id: u64,
    name: String,
    date_of_birth: Option<String>,
    role: String,
    batting_style: Option<String>,
    bowling_style: Option<String>,
    career_start: Option<String>,
    career_end: Option<String>,
    active: bool,
}

impl PlayerRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            player_id: row.get(0)?,
            name: row.get(1)?,
            date_of_birth: row.get(2)?,
            role: row.get(3)?,
            batting_style: row.get(4)?,
            bowling_style: row.get(5)?,
            career_start: row.get(6)?,
            career_end: row.get(7)?,
            active: row.get(8)?,
        })
    }

    fn into_player(self) -> Result<Player> {
        Ok(Player {
            player_id: PlayerId::new(self.player_id),
            name: self.name,
            date_of_birth: parse_optional_date(self.date_of_birth.as_deref())?,
            role: self.role.parse()?,
            batting_style: self.batting_style,
            bowling_style: self.bowling_style,
            career_start: parse_optional_date(self.career_start.as_deref())?,
            career_end: parse_optional_date(self.career_end.as_deref())?,
            active: self.active,
        })
    }
}

const MATCH_COLUMNS: &str = "m.match_id, m.player_id, m.format, m.level, m.date, m.venue, \
     m.city, m.country, m.opponent, m.result, m.home_away, m.series, m.conditions, \
     p.raw, p.derived";

/// A match joined with its performance, before re-validation
struct MatchRow {
    match_id: u64,
    player_id: u64,
    format: String,
    level: String,
    date: String,
    venue: String,
    city: String,
    country: String,
    opponent: String,
    result: String,
    home_away: String,
    series: Option<String>,
    conditions: Option<String>,
    raw: String,
    derived: String,
}

impl MatchRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            match_id: row.get(0)?,
            player_id: row.get(1)?,
            format: row.get(2)?,
            level: row.get(3)?,
            date: row.get(4)?,
            venue: row.get(5)?,
            city: row.get(6)?,
            country: row.get(7)?,
            opponent: row.get(8)?,
            result: row.get(9)?,
            home_away: row.get(10)?,
            series: row.get(11)?,
            conditions: row.get(12)?,
            raw: row.get(13)?,
            derived: row.get(14)?,
        })
    }

    fn match_id(&self) -> MatchId {
        MatchId::new(self.match_id)
    }

    fn match_input(&self) -> Result<MatchInput> {
        let conditions = match self.conditions.as_deref() {
            Some(json) => Some(serde_json::from_str::<Conditions>(json)?),
            None => None,
        };
        Ok(MatchInput {
            format: self.format.parse()?,
            level: self.level.parse()?,
            date: parse_date(&self.date)?,
            venue: self.venue.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            opponent: self.opponent.clone(),
            result: self.result.parse()?,
            home_away: self.home_away.parse()?,
            series: self.series.clone(),
            conditions,
        })
    }

    fn revalidate(&self) -> Result<(MatchRecord, Performance, PerformanceInput)> {
        let record = validate_match(
            &self.match_input()?,
            self.match_id(),
            PlayerId::new(self.player_id),
        )?;
        let raw: PerformanceInput = serde_json::from_str(&self.raw)?;
        let performance = validate_performance(record.format, &raw)?;
        Ok((record, performance, raw))
    }

    /// Stored rows go through the same validation as new submissions. Any
    /// failure is reported against this row's match id.
    fn into_record(self) -> Result<(PerformanceRecord, PerformanceInput)> {
        let (match_record, performance, raw) = self
            .revalidate()
            .map_err(|e| e.for_stored_match(self.match_id()))?;
        Ok((
            PerformanceRecord {
                match_record,
                performance,
            },
            raw,
        ))
    }
}

impl StatsDatabase {
    /// Register a player and return the assigned id
    pub fn add_player(&mut self, player: &NewPlayer) -> Result<PlayerId> {
        let name = player.name.trim();
        if name.is_empty() {
            return Err(StatsError::validation("player", "name", "must not be empty"));
        }
        if let (Some(start), Some(end)) = (player.career_start, player.career_end) {
            if end < start {
                return Err(StatsError::validation(
                    "player",
                    "careerEnd",
                    format!("{} is before careerStart {}", end, start),
                ));
            }
        }

        let now = unix_now()?;
        self.conn.execute(
            "INSERT INTO players
             (name, date_of_birth, role, batting_style, bowling_style,
              career_start, career_end, active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?)",
            params![
                name,
                player.date_of_birth.map(|d| d.to_string()),
                player.role.as_str(),
                player.batting_style,
                player.bowling_style,
                player.career_start.map(|d| d.to_string()),
                player.career_end.map(|d| d.to_string()),
                now
            ],
        )?;

        let player_id = PlayerId::new(self.conn.last_insert_rowid() as u64);
        info!(%player_id, name, "Added player");
        Ok(player_id)
    }

    pub fn list_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM players ORDER BY player_id",
            PLAYER_COLUMNS
        ))?;
        let rows = stmt.query_map([], PlayerRow::from_row)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?.into_player()?);
        }
        Ok(players)
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM players WHERE player_id = ?", PLAYER_COLUMNS),
                params![player_id.as_u64()],
                PlayerRow::from_row,
            )
            .optional()?
            .ok_or(StatsError::PlayerNotFound { player_id })?
            .into_player()
    }

    /// Make `player_id` the only active player
    pub fn set_active_player(&mut self, player_id: PlayerId) -> Result<()> {
        self.get_player(player_id)?;

        let tx = self.conn.transaction()?;
        tx.execute("UPDATE players SET active = 0 WHERE active = 1", [])?;
        tx.execute(
            "UPDATE players SET active = 1 WHERE player_id = ?",
            params![player_id.as_u64()],
        )?;
        tx.commit()?;

        info!(%player_id, "Active player changed");
        Ok(())
    }

    pub fn active_player(&self) -> Result<Option<PlayerId>> {
        let id = self
            .conn
            .query_row("SELECT player_id FROM players WHERE active = 1", [], |row| {
                row.get::<_, u64>(0)
            })
            .optional()?;
        Ok(id.map(PlayerId::new))
    }

    /// Validate a submission, derive its fields and store it for `player_id`.
    ///
    /// The match and its performance are written in one transaction; a
    /// submission that fails validation writes nothing.
    pub fn insert_match(
        &mut self,
        player_id: PlayerId,
        submission: &MatchSubmission,
    ) -> Result<MatchId> {
        self.get_player(player_id)?;

        // The real id is assigned by the insert below
        let mut record = validate_match(&submission.match_input, MatchId::new(0), player_id)?;
        let performance = validate_performance(record.format, &submission.performance)?;
        let derived = derive_fields(&performance);

        let raw = serde_json::to_string(&PerformanceInput::from(&performance))?;
        let derived_json = serde_json::to_string(&derived)?;
        let conditions = match &record.conditions {
            Some(c) => Some(serde_json::to_string(c)?),
            None => None,
        };
        let now = unix_now()?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO matches
             (player_id, format, level, date, venue, city, country, opponent,
              result, home_away, series, conditions, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                player_id.as_u64(),
                record.format.as_str(),
                record.level.as_str(),
                record.date.to_string(),
                record.venue,
                record.city,
                record.country,
                record.opponent,
                record.result.as_str(),
                record.home_away.as_str(),
                record.series,
                conditions,
                now
            ],
        )?;
        record.id = MatchId::new(tx.last_insert_rowid() as u64);
        tx.execute(
            "INSERT INTO performances (match_id, raw, derived, updated_at)
             VALUES (?, ?, ?, ?)",
            params![record.id.as_u64(), raw, derived_json, now],
        )?;
        tx.commit()?;

        info!(
            match_id = %record.id,
            %player_id,
            format = %record.format,
            opponent = %record.opponent,
            "Stored match"
        );
        Ok(record.id)
    }

    fn match_rows(&self, filter: &str, id: u64) -> Result<Vec<MatchRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM matches m
             JOIN performances p ON p.match_id = m.match_id
             WHERE {}
             ORDER BY m.date, m.match_id",
            MATCH_COLUMNS, filter
        ))?;
        let rows = stmt.query_map(params![id], MatchRow::from_row)?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }

    /// All of a player's validated records, by match date then match id.
    ///
    /// Fails with [`StatsError::MalformedRecord`] on the first stored row that
    /// no longer validates.
    pub fn load_records(&self, player_id: PlayerId) -> Result<Vec<PerformanceRecord>> {
        self.get_player(player_id)?;

        let rows = self.match_rows("m.player_id = ?", player_id.as_u64())?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let (record, _) = row.into_record()?;
            records.push(record);
        }
        debug!(%player_id, matches = records.len(), "Loaded records");
        Ok(records)
    }

    pub fn list_matches(&self, player_id: PlayerId) -> Result<Vec<MatchSummary>> {
        Ok(self
            .load_records(player_id)?
            .into_iter()
            .map(|r| {
                let totals = derive_fields(&r.performance).totals;
                MatchSummary {
                    match_id: r.match_id(),
                    date: r.match_record.date,
                    format: r.match_record.format,
                    opponent: r.match_record.opponent,
                    venue: r.match_record.venue,
                    result: r.match_record.result,
                    runs: totals.runs,
                    wickets: totals.wickets,
                }
            })
            .collect())
    }

    /// One match with its stored derived fields
    pub fn get_match(&self, match_id: MatchId) -> Result<StoredMatch> {
        let row = self
            .match_rows("m.match_id = ?", match_id.as_u64())?
            .into_iter()
            .next()
            .ok_or(StatsError::MatchNotFound { match_id })?;

        let stored_derived = serde_json::from_str::<DerivedFields>(&row.derived).ok();
        let (record, raw) = row.into_record()?;

        let derived = derive_fields(&record.performance);
        if stored_derived.as_ref() != Some(&derived) {
            warn!(%match_id, "Stored derived fields are stale, showing recomputed values");
        }

        Ok(StoredMatch {
            match_record: record.match_record,
            performance: raw,
            derived,
        })
    }

    /// Delete a match and its performance, returning the player it belonged to
    pub fn delete_match(&mut self, match_id: MatchId) -> Result<PlayerId> {
        let player_id = self
            .conn
            .query_row(
                "SELECT player_id FROM matches WHERE match_id = ?",
                params![match_id.as_u64()],
                |row| row.get::<_, u64>(0),
            )
            .optional()?
            .map(PlayerId::new)
            .ok_or(StatsError::MatchNotFound { match_id })?;

        self.conn.execute(
            "DELETE FROM matches WHERE match_id = ?",
            params![match_id.as_u64()],
        )?;
        info!(%match_id, %player_id, "Deleted match");
        Ok(player_id)
    }

    /// Match count and highest match id, to compare against a stored snapshot
    pub fn match_fingerprint(&self, player_id: PlayerId) -> Result<MatchFingerprint> {
        let (match_count, last_match_id) = self.conn.query_row(
            "SELECT COUNT(*), MAX(match_id) FROM matches WHERE player_id = ?",
            params![player_id.as_u64()],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, Option<u64>>(1)?)),
        )?;
        Ok(MatchFingerprint {
            match_count,
            last_match_id: last_match_id.map(MatchId::new),
        })
    }

    pub fn match_count(&self, player_id: PlayerId) -> Result<u32> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM matches WHERE player_id = ?",
            params![player_id.as_u64()],
            |row| row.get(0),
        )?)
    }
}
