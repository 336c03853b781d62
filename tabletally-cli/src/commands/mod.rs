pub(crate) mod detect;
pub(crate) mod history;
pub(crate) mod import;
pub(crate) mod list;
pub(crate) mod reconcile;
pub(crate) mod show;
pub(crate) mod stats;

use std::path::{Path, PathBuf};

use crate::CliError;

pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabletally")
        .join("stats.db")
}

/// Open or create the stats database, creating parent directories as needed.
pub(crate) fn open_db(path: &Path) -> Result<tabletally_db::Connection, CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    tabletally_db::open_database(path)
        .map_err(|e| CliError::database(format!("Failed to open database at {}: {}", path.display(), e)))
}

/// Open an existing stats database for reading. `Ok(None)` means no database
/// file exists yet; callers print the hint and return without failing.
pub(crate) fn open_existing_db(path: &Path) -> Result<Option<tabletally_db::Connection>, CliError> {
    if !path.exists() {
        log::warn!("No stats database found at {}", path.display());
        log::info!("Run 'tabletally import <FILE>' to create one.");
        return Ok(None);
    }
    let conn = tabletally_db::open_database(path)
        .map_err(|e| CliError::database(format!("Failed to open database at {}: {}", path.display(), e)))?;
    Ok(Some(conn))
}

/// Read the whole input: a file path, or stdin when the path is "-".
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        return Ok(std::io::read_to_string(std::io::stdin())?);
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::other(format!("Failed to read {}: {}", path.display(), e)))
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else if max > 3 {
        format!("{}...", &s[..max - 3])
    } else {
        s[..max].to_string()
    }
}
