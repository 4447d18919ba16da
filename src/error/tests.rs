//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod stats_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let stats_error = StatsError::from(json_error);

        match stats_error {
            StatsError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let stats_error = StatsError::from(io_error);

        match stats_error {
            StatsError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "not_a_number".parse::<u64>().unwrap_err();
        let stats_error = StatsError::from(parse_error);

        match stats_error {
            StatsError::InvalidId(_) => (),
            _ => panic!("Expected InvalidId error variant"),
        }
    }

    #[test]
    fn test_date_error_conversion() {
        let date_error = "2024-13-45".parse::<chrono::NaiveDate>().unwrap_err();
        let stats_error = StatsError::from(date_error);

        match stats_error {
            StatsError::InvalidDate(_) => (),
            _ => panic!("Expected InvalidDate error variant"),
        }
    }

    #[test]
    fn test_database_error_conversion() {
        let db_error = rusqlite::Error::InvalidColumnType(
            0,
            "test_column".to_string(),
            rusqlite::types::Type::Null,
        );
        let stats_error = StatsError::from(db_error);

        match stats_error {
            StatsError::Database(_) => (),
            _ => panic!("Expected Database error variant"),
        }
    }

    #[test]
    fn test_missing_player_id_error() {
        let error = StatsError::MissingPlayerId {
            env_var: "CRICKET_STATS_PLAYER_ID".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("Player ID not provided"));
        assert!(error_string.contains("CRICKET_STATS_PLAYER_ID"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = StatsError::validation("batting", "runs", "must not be negative");
        assert_eq!(error.to_string(), "Invalid batting: runs must not be negative");
    }

    #[test]
    fn test_invalid_enum_error_display() {
        let error = StatsError::InvalidEnum {
            kind: "format",
            value: "Hundred".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid format: Hundred");
    }

    #[test]
    fn test_for_stored_match_rewrites_validation() {
        let error = StatsError::validation("bowling", "overs", "ball digit must be 0-5")
            .for_stored_match(MatchId::new(42));

        match error {
            StatsError::MalformedRecord { match_id, message } => {
                assert_eq!(match_id, MatchId::new(42));
                assert!(message.contains("overs"));
            }
            _ => panic!("Expected MalformedRecord error variant"),
        }
    }

    #[test]
    fn test_for_stored_match_rewrites_invalid_enum() {
        let error = StatsError::InvalidEnum {
            kind: "dismissal type",
            value: "timed_out".to_string(),
        }
        .for_stored_match(MatchId::new(7));

        let error_string = error.to_string();
        assert!(error_string.contains("match 7"));
        assert!(error_string.contains("timed_out"));
    }

    #[test]
    fn test_for_stored_match_keeps_other_errors() {
        let error = StatsError::PlayerNotFound {
            player_id: PlayerId::new(3),
        }
        .for_stored_match(MatchId::new(1));

        match error {
            StatsError::PlayerNotFound { player_id } => assert_eq!(player_id.as_u64(), 3),
            _ => panic!("Expected PlayerNotFound error variant"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let stats_error = StatsError::from(io_error);

        let error_trait: &dyn std::error::Error = &stats_error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(StatsError::NoDataDir)
        }

        let result = test_function();
        match result.unwrap_err() {
            StatsError::NoDataDir => (),
            _ => panic!("Expected NoDataDir error"),
        }
    }
}
