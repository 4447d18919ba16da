//! Storage layer for the cricket statistics tracker
//!
//! This module provides an abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Player and match operations
//! - `snapshots`: Stored analytics snapshots and recalculation

pub mod models;
pub mod queries;
pub mod schema;
pub mod snapshots;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::StatsDatabase;
