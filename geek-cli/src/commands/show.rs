use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use geek_catalog::{catalog_registry, MediaModel};
use geek_db::MediaService;

use crate::CliError;

use super::open_existing_catalog;

pub(crate) fn run_show(db_path: &Path, id: i32, json: bool) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(db_path)? else {
        return Ok(());
    };
    let registry = catalog_registry();
    let service = MediaService::new(&conn, &registry);

    let media = service
        .find_by_id_eager(id)
        .map_err(|e| CliError::database(format!("Lookup failed: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("no media with id {}", id)))?;

    if json {
        let out = serde_json::to_string_pretty(&media)
            .map_err(|e| CliError::database(format!("Failed to serialize media: {}", e)))?;
        println!("{out}");
        return Ok(());
    }

    print_media(&media);
    Ok(())
}

fn print_media(media: &MediaModel) {
    log::info!(
        "{}",
        media
            .name
            .as_deref()
            .unwrap_or("?")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    if let Some(category) = &media.media_category {
        log::info!(
            "  Category:  {}",
            category.type_category.as_deref().unwrap_or("?")
        );
    }
    if let Some(seasons) = media.total_season {
        log::info!("  Seasons:   {}", seasons);
    }
    if let Some(cover) = media.cover.as_deref() {
        log::info!("  Cover:     {}", cover.if_supports_color(Stdout, |t| t.cyan()));
    }
    if let Some(banner) = media.banner() {
        log::info!("  Banner:    {}", banner.if_supports_color(Stdout, |t| t.cyan()));
    }
    if let Some(updated) = media.update_at {
        log::info!("  Updated:   {}", updated.format("%Y-%m-%d %H:%M"));
    }

    if !media.alternative_titles.is_empty() {
        crate::log_blank();
        log::info!("  Also known as:");
        for title in &media.alternative_titles {
            log::info!("    - {}", title.name.as_deref().unwrap_or("?"));
        }
    }

    if !media.external_references.is_empty() {
        crate::log_blank();
        log::info!("  References:");
        for reference in &media.external_references {
            let provider = reference
                .type_reference
                .as_ref()
                .and_then(|t| t.name_reference.as_deref())
                .unwrap_or("?");
            log::info!(
                "    {:<14} {}",
                provider,
                reference.reference.as_deref().unwrap_or("?")
            );
        }
    }

    if let Some(about) = media.about.as_deref() {
        crate::log_blank();
        log::info!("{}", about);
    }
}
