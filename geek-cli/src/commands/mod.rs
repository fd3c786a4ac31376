pub(crate) mod artwork;
pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod search;
pub(crate) mod show;
pub(crate) mod stats;

use std::path::Path;

use geek_db::Connection;

use crate::CliError;

/// Open the catalog, creating its directory and schema on first use.
pub(crate) fn open_catalog(db_path: &Path) -> Result<Connection, CliError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    geek_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Open an existing catalog, or explain how to create one.
pub(crate) fn open_existing_catalog(db_path: &Path) -> Result<Option<Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'geek import <seed.yaml>' to create one.");
        return Ok(None);
    }
    open_catalog(db_path).map(Some)
}

/// Truncate a string to a maximum number of characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
