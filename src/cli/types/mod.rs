//! Type-safe wrappers and enums shared by the CLI, engine and storage.

pub mod cricket;
pub mod ids;
pub mod views;

pub use cricket::{DismissalType, HomeAway, MatchFormat, MatchLevel, MatchResult, PlayerRole};
pub use ids::{MatchId, PlayerId};
pub use views::{Category, StatsView};
