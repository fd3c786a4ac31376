use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::settings::{self, Settings};
use crate::CliError;

/// Show the settings in effect and where they come from.
pub(crate) fn run_config_show(db_override: Option<PathBuf>, settings: &Settings) {
    let path = settings::settings_path();

    log::info!("{}", "Geek Catalog Configuration".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let source = if db_override.is_some() {
        "--db"
    } else if settings.database.path.is_some() {
        "settings"
    } else {
        "default"
    };
    let db_path = settings::resolve_db_path(db_override, settings);
    log::info!(
        "  Database:      {} {}",
        db_path.display(),
        format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("  Page size:     {}", settings.search.page_size);
}

pub(crate) fn run_config_path() {
    println!("{}", settings::settings_path().display());
}

pub(crate) fn run_config_set_db(path: &Path) -> Result<(), CliError> {
    let absolute = std::path::absolute(path)?;
    settings::update(
        &settings::settings_path(),
        "database",
        "path",
        toml::Value::String(absolute.to_string_lossy().into_owned()),
    )
    .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!("Default database set to {}", absolute.display());
    Ok(())
}

pub(crate) fn run_config_set_page_size(size: u32) -> Result<(), CliError> {
    if size == 0 {
        return Err(CliError::config("page size must be at least 1"));
    }
    settings::update(
        &settings::settings_path(),
        "search",
        "page_size",
        toml::Value::Integer(i64::from(size)),
    )
    .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!("Default page size set to {}", size);
    Ok(())
}
