//! Where the statistics database lives on disk

use std::{fs, path::Path, path::PathBuf};

use crate::error::{Result, StatsError};

const APP_DIR: &str = "cricket-stats";
const DB_FILE: &str = "stats.db";

/// Path: {data_dir}/cricket-stats/stats.db
pub fn default_database_path() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .ok_or(StatsError::NoDataDir)?;
    Ok(base.join(APP_DIR).join(DB_FILE))
}

/// Create the directory that will hold `path`, if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_database_path() {
        let path = default_database_path().unwrap();
        let path_str = path.to_string_lossy();

        assert!(path_str.contains("cricket-stats"));
        assert!(path_str.ends_with("stats.db"));
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("a").join("b").join("stats.db");

        ensure_parent_dir(&db_path).unwrap();

        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn test_ensure_parent_dir_accepts_bare_file_name() {
        ensure_parent_dir(Path::new("stats.db")).unwrap();
    }
}
