//! End-to-end tests: JSON submissions through validation, storage and recalculation

use cricket_stats::{
    cli::types::PlayerRole,
    engine::{derive_fields, validate_performance, MatchSubmission},
    storage::{NewPlayer, StatsDatabase},
    recalculate, Category, MatchFormat, PlayerId, StatsError,
};
use serde_json::{json, Value};

fn submission(format: &str, result: &str, date: &str, performance: Value) -> MatchSubmission {
    serde_json::from_value(json!({
        "match": {
            "format": format,
            "level": "international",
            "date": date,
            "venue": "Wankhede Stadium",
            "city": "Mumbai",
            "country": "India",
            "opponent": "India",
            "result": result,
            "homeAway": "away"
        },
        "performance": performance
    }))
    .unwrap()
}

fn setup() -> (StatsDatabase, PlayerId) {
    let mut db = StatsDatabase::new_in_memory().unwrap();
    let player_id = db
        .add_player(&NewPlayer::new("Test Player", PlayerRole::AllRounder))
        .unwrap();
    (db, player_id)
}

#[test]
fn test_two_odi_career() {
    let (mut db, player_id) = setup();
    db.insert_match(
        player_id,
        &submission(
            "ODI",
            "won",
            "2024-03-01",
            json!({
                "batting": { "runs": 50, "ballsFaced": 40, "dismissalType": "caught" },
                "bowling": { "overs": 4, "runsConceded": 30, "wickets": 2 }
            }),
        ),
    )
    .unwrap();
    db.insert_match(
        player_id,
        &submission(
            "ODI",
            "lost",
            "2024-03-04",
            json!({
                "batting": { "runs": 100, "ballsFaced": 80, "dismissalType": "not_out" },
                "bowling": { "overs": 5, "runsConceded": 45, "wickets": 0 }
            }),
        ),
    )
    .unwrap();

    let stored = db.refresh_snapshot(player_id, Category::All).unwrap();
    let career = &stored.snapshot.career.stats;

    assert_eq!(career.matches, 2);
    assert_eq!(career.batting.innings, 2);
    assert_eq!(career.batting.runs, 150);
    assert_eq!(career.batting.not_outs, 1);
    assert_eq!(career.batting.dismissals, 1);
    assert_eq!(career.batting.average, Some(150.0));
    assert_eq!(career.batting.strike_rate, 125.0);
    assert_eq!(career.batting.fifties, 1);
    assert_eq!(career.batting.centuries, 1);
    assert_eq!(career.bowling.wickets, 2);
    // Only the wicket-taking spell (4-0-30-2) counts towards the average.
    assert_eq!(career.bowling.runs_conceded, 75);
    assert_eq!(career.bowling.average, Some(15.0));
    assert_eq!(career.bowling.economy, 8.33);
    assert_eq!(career.results.won, 1);
    assert_eq!(career.results.lost, 1);
    assert_eq!(career.results.win_percentage, 50.0);
}

#[test]
fn test_overs_notation_is_ball_based() {
    let performance = submission(
        "Test",
        "draw",
        "2024-02-02",
        json!({
            "firstInningsBowling": { "overs": 4.3, "runsConceded": 20, "wickets": 1 },
            "secondInningsBowling": { "overs": 5.4, "runsConceded": 21, "wickets": 2 }
        }),
    )
    .performance;

    let validated = validate_performance(MatchFormat::Test, &performance).unwrap();
    let derived = derive_fields(&validated);

    assert_eq!(derived.bowling[0].balls_bowled, 27);
    assert_eq!(derived.bowling[1].balls_bowled, 34);
    assert_eq!(derived.totals.overs.to_string(), "10.1");
    assert_eq!(derived.totals.wickets, 3);
}

#[test]
fn test_illegal_overs_are_rejected() {
    let (mut db, player_id) = setup();
    let result = db.insert_match(
        player_id,
        &submission(
            "T20",
            "won",
            "2024-02-02",
            json!({ "bowling": { "overs": 4.6, "runsConceded": 20, "wickets": 1 } }),
        ),
    );

    match result {
        Err(StatsError::Validation { field, .. }) => assert_eq!(field, "overs"),
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

#[test]
fn test_wicketless_spell_has_no_average() {
    let (mut db, player_id) = setup();
    let match_id = db
        .insert_match(
            player_id,
            &submission(
                "T20",
                "won",
                "2024-02-02",
                json!({ "bowling": { "overs": 4, "runsConceded": 41, "wickets": 0 } }),
            ),
        )
        .unwrap();

    let bowling = &db.get_match(match_id).unwrap().derived.bowling[0];
    assert_eq!(bowling.average, None);
    assert_eq!(bowling.strike_rate, None);
    assert_eq!(bowling.economy, 10.25);

    let json = serde_json::to_value(bowling).unwrap();
    assert!(json.get("average").is_none());
}

#[test]
fn test_layout_must_match_format() {
    let (mut db, player_id) = setup();
    let result = db.insert_match(
        player_id,
        &submission(
            "ODI",
            "won",
            "2024-02-02",
            json!({ "firstInningsBatting": { "runs": 10, "dismissalType": "bowled" } }),
        ),
    );

    assert!(matches!(result, Err(StatsError::Validation { .. })));
}

#[test]
fn test_stored_records_match_in_memory_recalculation() {
    let (mut db, player_id) = setup();
    for (date, runs, format) in [
        ("2023-11-20", 12, "T20"),
        ("2022-05-14", 77, "ODI"),
        ("2023-01-09", 140, "First-class"),
    ] {
        let performance = if format == "First-class" {
            json!({
                "firstInningsBatting": {
                    "runs": runs,
                    "ballsFaced": 200,
                    "dismissalType": "caught"
                },
                "secondInningsBatting": { "runs": 8, "ballsFaced": 15, "dismissalType": "run_out" }
            })
        } else {
            json!({ "batting": { "runs": runs, "ballsFaced": 50, "dismissalType": "bowled" } })
        };
        db.insert_match(player_id, &submission(format, "won", date, performance))
            .unwrap();
    }

    let records = db.load_records(player_id).unwrap();
    let stored = db.refresh_snapshot(player_id, Category::All).unwrap();

    assert_eq!(stored.snapshot, recalculate(player_id, &records));
    assert_eq!(
        serde_json::to_string(&stored.snapshot).unwrap(),
        serde_json::to_string(&recalculate(player_id, &records)).unwrap()
    );
    assert_eq!(stored.snapshot.career.stats.batting.innings, 4);
    assert_eq!(stored.snapshot.career.first_match, "2022-05-14".parse().ok());

    let years: Vec<_> = stored.snapshot.years.iter().map(|y| y.year).collect();
    assert_eq!(years, vec![2022, 2023]);
}
