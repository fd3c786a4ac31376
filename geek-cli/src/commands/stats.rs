use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_existing_catalog;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(db_path)? else {
        return Ok(());
    };

    let stats = geek_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;
    let categories = geek_db::list_categories(&conn)
        .map_err(|e| CliError::database(format!("Failed to list categories: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Categories:          {:>8}", stats.categories);
    log::info!("  Media:               {:>8}", stats.media);
    log::info!("  Alternative titles:  {:>8}", stats.alternative_titles);
    log::info!("  External refs:       {:>8}", stats.external_references);
    log::info!("  With banner:         {:>8}", stats.with_banner);
    if stats.uncategorized > 0 {
        log::info!("  Uncategorized:       {:>8}", stats.uncategorized);
    }

    if !categories.is_empty() {
        crate::log_blank();
        for row in &categories {
            log::info!(
                "  {:>3}  {:<18} {:>8}",
                row.id.if_supports_color(Stdout, |t| t.dimmed()),
                row.type_category,
                row.media_count,
            );
        }
    }

    Ok(())
}
