//! User settings (database location, default page size).
//!
//! Stored in `~/.config/geek-catalog/settings.toml`:
//!
//! ```toml
//! [database]
//! path = "/home/me/catalog.db"
//!
//! [search]
//! page_size = 25
//! ```

use std::io;
use std::path::{Path, PathBuf};

use geek_query::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub database: DatabaseSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DatabaseSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SearchSettings {
    pub page_size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("geek-catalog").join("settings.toml")
}

/// Where the catalog lives when neither the CLI nor the settings say.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("geek-catalog").join("catalog.db")
}

pub(crate) fn load() -> Settings {
    load_from(&settings_path())
}

/// Missing files give defaults; corrupt ones give defaults plus a warning.
pub(crate) fn load_from(path: &Path) -> Settings {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return Settings::default();
    };
    match toml::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

/// Resolve the database path:
///
/// 1. CLI override (if `Some`)
/// 2. `database.path` in settings
/// 3. The per-user data directory
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>, settings: &Settings) -> PathBuf {
    cli_override
        .or_else(|| settings.database.path.clone())
        .unwrap_or_else(default_db_path)
}

/// Set `[section] key = value`, leaving everything else in the file alone.
pub(crate) fn update(path: &Path, section: &str, key: &str, value: toml::Value) -> io::Result<()> {
    let mut doc: toml::Value = std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.parse().ok())
        .unwrap_or_else(|| toml::Value::Table(Default::default()));

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let section_table = table
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{section}] is not a table")))?;
    section_table.insert(key.to_string(), value);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}
