//! Unit tests for storage functionality

use super::*;
use crate::cli::types::{Category, PlayerRole};
use crate::core::SnapshotCache;
use crate::engine::MatchSubmission;
use crate::error::StatsError;
use crate::{MatchId, PlayerId};
use serde_json::json;

fn create_test_db() -> StatsDatabase {
    StatsDatabase::new_in_memory().unwrap()
}

fn create_test_db_with_player() -> (StatsDatabase, PlayerId) {
    let mut db = create_test_db();
    let player_id = db
        .add_player(&NewPlayer::new("Test Player", PlayerRole::AllRounder))
        .unwrap();
    (db, player_id)
}

fn odi(date: &str, runs: i64, dismissal: &str) -> MatchSubmission {
    serde_json::from_value(json!({
        "match": {
            "format": "ODI",
            "level": "international",
            "date": date,
            "venue": "Lord's",
            "city": "London",
            "country": "England",
            "opponent": "England",
            "result": "won",
            "homeAway": "away"
        },
        "performance": {
            "batting": { "runs": runs, "ballsFaced": 60, "dismissalType": dismissal },
            "bowling": { "overs": 7.2, "runsConceded": 35, "wickets": 1 },
            "fielding": { "catches": 1 }
        }
    }))
    .unwrap()
}

fn table_count(db: &StatsDatabase, table: &str) -> u32 {
    db.conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
}

#[test]
fn test_database_creation() {
    let db = create_test_db();
    assert!(db.list_players().unwrap().is_empty());
}

#[test]
fn test_add_and_get_player() {
    let mut db = create_test_db();
    let mut new_player = NewPlayer::new("  Jane Doe ", PlayerRole::Batsman);
    new_player.batting_style = Some("right-hand bat".to_string());
    new_player.career_start = "2015-04-01".parse().ok();

    let player_id = db.add_player(&new_player).unwrap();
    let player = db.get_player(player_id).unwrap();

    assert_eq!(player.name, "Jane Doe");
    assert_eq!(player.role, PlayerRole::Batsman);
    assert_eq!(player.batting_style.as_deref(), Some("right-hand bat"));
    assert_eq!(player.career_start, "2015-04-01".parse().ok());
    assert!(!player.active);
}

#[test]
fn test_add_player_rejects_blank_name() {
    let mut db = create_test_db();
    let result = db.add_player(&NewPlayer::new("   ", PlayerRole::Bowler));

    assert!(matches!(result, Err(StatsError::Validation { .. })));
    assert_eq!(table_count(&db, "players"), 0);
}

#[test]
fn test_get_missing_player() {
    let db = create_test_db();

    match db.get_player(PlayerId::new(404)) {
        Err(StatsError::PlayerNotFound { player_id }) => assert_eq!(player_id.as_u64(), 404),
        other => panic!("Expected PlayerNotFound, got {:?}", other),
    }
}

#[test]
fn test_only_one_active_player() {
    let (mut db, first) = create_test_db_with_player();
    let second = db
        .add_player(&NewPlayer::new("Second", PlayerRole::Bowler))
        .unwrap();
    assert_eq!(db.active_player().unwrap(), None);

    db.set_active_player(first).unwrap();
    db.set_active_player(second).unwrap();

    assert_eq!(db.active_player().unwrap(), Some(second));
    let active: Vec<_> = db
        .list_players()
        .unwrap()
        .into_iter()
        .filter(|p| p.active)
        .collect();
    assert_eq!(active.len(), 1);

    // The partial unique index rejects a second active row
    let direct = db.conn.execute(
        "UPDATE players SET active = 1 WHERE player_id = ?",
        [first.as_u64()],
    );
    assert!(direct.is_err());
}

#[test]
fn test_insert_match_stores_raw_and_derived() {
    let (mut db, player_id) = create_test_db_with_player();

    let match_id = db
        .insert_match(player_id, &odi("2024-06-01", 72, "caught"))
        .unwrap();
    let stored = db.get_match(match_id).unwrap();

    assert_eq!(stored.match_record.id, match_id);
    assert_eq!(stored.match_record.player_id, player_id);
    assert_eq!(stored.derived.batting[0].strike_rate, 120.0);
    assert!(stored.derived.batting[0].is_fifty);
    assert_eq!(stored.derived.bowling[0].balls_bowled, 44);
    assert_eq!(stored.derived.fielding.total_dismissals, 1);
    assert_eq!(stored.performance.bowling.as_ref().unwrap().overs, 7.2);
    assert_eq!(table_count(&db, "performances"), 1);
}

#[test]
fn test_invalid_submission_writes_nothing() {
    let (mut db, player_id) = create_test_db_with_player();
    let mut submission = odi("2024-06-01", 40, "bowled");
    submission.performance.bowling.as_mut().unwrap().overs = 4.6;

    let result = db.insert_match(player_id, &submission);

    assert!(matches!(result, Err(StatsError::Validation { .. })));
    assert_eq!(table_count(&db, "matches"), 0);
    assert_eq!(table_count(&db, "performances"), 0);
}

#[test]
fn test_insert_match_for_unknown_player() {
    let mut db = create_test_db();
    let result = db.insert_match(PlayerId::new(9), &odi("2024-06-01", 10, "lbw"));

    assert!(matches!(result, Err(StatsError::PlayerNotFound { .. })));
}

#[test]
fn test_load_records_in_date_order() {
    let (mut db, player_id) = create_test_db_with_player();
    let late = db
        .insert_match(player_id, &odi("2024-08-10", 5, "bowled"))
        .unwrap();
    let early = db
        .insert_match(player_id, &odi("2023-01-15", 88, "not_out"))
        .unwrap();
    let same_day = db
        .insert_match(player_id, &odi("2024-08-10", 31, "run_out"))
        .unwrap();

    let ids: Vec<_> = db
        .load_records(player_id)
        .unwrap()
        .iter()
        .map(|r| r.match_id())
        .collect();
    assert_eq!(ids, vec![early, late, same_day]);

    let summaries = db.list_matches(player_id).unwrap();
    assert_eq!(summaries[0].runs, 88);
    assert_eq!(summaries[0].wickets, 1);
    assert_eq!(db.match_count(player_id).unwrap(), 3);
}

#[test]
fn test_delete_match_cascades() {
    let (mut db, player_id) = create_test_db_with_player();
    let match_id = db
        .insert_match(player_id, &odi("2024-06-01", 12, "stumped"))
        .unwrap();

    assert_eq!(db.delete_match(match_id).unwrap(), player_id);
    assert_eq!(table_count(&db, "matches"), 0);
    assert_eq!(table_count(&db, "performances"), 0);
    assert!(matches!(
        db.delete_match(match_id),
        Err(StatsError::MatchNotFound { .. })
    ));
}

#[test]
fn test_malformed_performance_reports_match_id() {
    let (mut db, player_id) = create_test_db_with_player();
    db.insert_match(player_id, &odi("2024-06-01", 12, "caught"))
        .unwrap();
    let bad = db
        .insert_match(player_id, &odi("2024-06-02", 30, "caught"))
        .unwrap();
    db.conn
        .execute(
            "UPDATE performances SET raw = ? WHERE match_id = ?",
            rusqlite::params![
                r#"{"batting":{"runs":-5,"dismissalType":"caught"}}"#,
                bad.as_u64()
            ],
        )
        .unwrap();

    match db.load_records(player_id) {
        Err(StatsError::MalformedRecord { match_id, message }) => {
            assert_eq!(match_id, bad);
            assert!(message.contains("runs"));
        }
        other => panic!("Expected MalformedRecord, got {:?}", other),
    }
}

#[test]
fn test_unknown_stored_format_reports_match_id() {
    let (mut db, player_id) = create_test_db_with_player();
    let bad = db
        .insert_match(player_id, &odi("2024-06-02", 30, "caught"))
        .unwrap();
    db.conn
        .execute(
            "UPDATE matches SET format = 'Hundred' WHERE match_id = ?",
            [bad.as_u64()],
        )
        .unwrap();

    let error = db.get_match(bad).unwrap_err();
    assert!(error.to_string().contains(&format!("match {}", bad)));
}

#[test]
fn test_get_match_recomputes_stale_derived_fields() {
    let (mut db, player_id) = create_test_db_with_player();
    let match_id = db
        .insert_match(player_id, &odi("2024-06-01", 0, "bowled"))
        .unwrap();
    db.conn
        .execute(
            "UPDATE performances SET derived = '{}' WHERE match_id = ?",
            [match_id.as_u64()],
        )
        .unwrap();

    let stored = db.get_match(match_id).unwrap();
    assert!(stored.derived.batting[0].is_duck);
}

#[test]
fn test_get_missing_match() {
    let db = create_test_db();

    assert!(matches!(
        db.get_match(MatchId::new(1)),
        Err(StatsError::MatchNotFound { .. })
    ));
}

#[test]
fn test_snapshot_store_and_reload() {
    let (mut db, player_id) = create_test_db_with_player();
    db.insert_match(player_id, &odi("2024-06-01", 64, "caught"))
        .unwrap();
    assert!(db.latest_snapshot(player_id).unwrap().is_none());

    let stored = db.refresh_snapshot(player_id, Category::All).unwrap();
    assert_eq!(stored.match_count, 1);
    assert_eq!(stored.snapshot.career.stats.batting.runs, 64);

    // Bypass the cache to read the row back
    db.cache = SnapshotCache::default();
    let reloaded = db.latest_snapshot(player_id).unwrap().unwrap();
    assert_eq!(reloaded, stored);
    assert_eq!(table_count(&db, "analytics_snapshots"), 1);
}

#[test]
fn test_refresh_replaces_previous_snapshot() {
    let (mut db, player_id) = create_test_db_with_player();
    db.insert_match(player_id, &odi("2024-06-01", 64, "caught"))
        .unwrap();
    db.refresh_snapshot(player_id, Category::All).unwrap();

    db.insert_match(player_id, &odi("2024-06-05", 20, "lbw"))
        .unwrap();
    let refreshed = db.refresh_snapshot(player_id, Category::Batting).unwrap();

    let career = &refreshed.snapshot.career.stats;
    assert_eq!(career.matches, 2);
    assert_eq!(career.batting.runs, 84);
    // Bowling was not refreshed
    assert_eq!(career.bowling.wickets, 1);
    assert_eq!(refreshed.match_count, 2);
    assert_eq!(table_count(&db, "analytics_snapshots"), 1);
}

#[test]
fn test_snapshot_is_stale_after_delete_then_add() {
    let (mut db, player_id) = create_test_db_with_player();
    let first = db
        .insert_match(player_id, &odi("2024-06-01", 64, "caught"))
        .unwrap();
    db.insert_match(player_id, &odi("2024-06-05", 20, "lbw"))
        .unwrap();
    let stored = db.refresh_snapshot(player_id, Category::All).unwrap();
    assert!(db.snapshot_is_current(&stored).unwrap());

    db.delete_match(first).unwrap();
    assert!(!db.snapshot_is_current(&stored).unwrap());

    // Same count as when the snapshot was taken, different matches
    db.insert_match(player_id, &odi("2024-06-09", 7, "bowled"))
        .unwrap();
    assert_eq!(db.match_count(player_id).unwrap(), stored.match_count);
    assert!(!db.snapshot_is_current(&stored).unwrap());

    let refreshed = db.refresh_snapshot(player_id, Category::All).unwrap();
    assert!(db.snapshot_is_current(&refreshed).unwrap());
    assert_eq!(refreshed.last_match_id, Some(MatchId::new(3)));
}

#[test]
fn test_fingerprint_of_player_without_matches() {
    let (db, player_id) = create_test_db_with_player();

    let fingerprint = db.match_fingerprint(player_id).unwrap();
    assert_eq!(fingerprint.match_count, 0);
    assert_eq!(fingerprint.last_match_id, None);
}
