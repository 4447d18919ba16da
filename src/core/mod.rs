//! Core utilities shared across the application
//!
//! - `cache`: in-memory LRU cache of analytics snapshots
//! - `paths`: default on-disk location of the database

pub mod cache;
pub mod paths;

pub use cache::{SnapshotCache, DEFAULT_SNAPSHOT_CAPACITY};
pub use paths::{default_database_path, ensure_parent_dir};
