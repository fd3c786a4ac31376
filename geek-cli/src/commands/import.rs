use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_catalog;

pub(crate) fn run_import(db_path: &Path, seed_path: &Path) -> Result<(), CliError> {
    let seed = geek_catalog::load_seed_path(seed_path)
        .map_err(|e| CliError::import(e.to_string()))?;
    log::info!(
        "Loaded {} categories and {} media from {}",
        seed.categories.len(),
        seed.media.len(),
        seed_path.display(),
    );

    let conn = open_catalog(db_path)?;
    let stats = geek_db::seed_from_catalog(&conn, &seed)
        .map_err(|e| CliError::database(format!("Import failed: {}", e)))?;

    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("  Database:            {}", db_path.display());
    log::info!("  Categories:          {:>6}", stats.categories);
    log::info!("  Media inserted:      {:>6}", stats.inserted);
    log::info!("  Media updated:       {:>6}", stats.updated);
    log::info!("  Alternative titles:  {:>6}", stats.alternative_titles);
    if stats.skipped > 0 {
        log::warn!(
            "  Skipped {} media with unknown categories",
            stats.skipped
        );
    }
    Ok(())
}
