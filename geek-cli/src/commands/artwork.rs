use std::path::Path;

use geek_catalog::catalog_registry;
use geek_db::MediaService;

use crate::CliError;

use super::open_existing_catalog;

pub(crate) fn run_artwork(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(db_path)? else {
        return Ok(());
    };
    let registry = catalog_registry();

    match MediaService::new(&conn, &registry)
        .random_artwork()
        .map_err(|e| CliError::database(format!("Failed to pick artwork: {}", e)))?
    {
        Some(banner) => println!("{banner}"),
        None => log::warn!("No media has a banner yet"),
    }
    Ok(())
}
