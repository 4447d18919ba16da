//! Statistics engine: validation, derived fields and rollups.
//!
//! - `input`: raw submissions and their validation
//! - `types`: validated match and performance records
//! - `overs`: packed overs notation
//! - `derive`: per-performance derived fields
//! - `rollup`: the partition-then-reduce combinator and [`StatLine`]
//! - `breakdown`: career summary and grouped breakdowns
//! - `milestones`: conversion rates and the dismissal histogram
//! - `snapshot`: full and per-category recalculation

pub mod breakdown;
pub mod derive;
pub mod input;
pub mod milestones;
pub mod overs;
pub mod rollup;
pub mod snapshot;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use breakdown::{
    CareerSummary, FormatStats, HomeAwayStats, OpponentStats, VenueStats, YearlyStats,
};
pub use derive::{derive_fields, DerivedFields};
pub use input::{validate_match, validate_performance, MatchSubmission};
pub use milestones::{ConversionRates, DismissalTypeHistogram};
pub use overs::Overs;
pub use rollup::{rollup_by, StatLine};
pub use snapshot::{recalculate, recalculate_category, AnalyticsSnapshot};
pub use types::{Category, MatchRecord, Performance, PerformanceRecord};
