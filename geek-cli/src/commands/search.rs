use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use geek_catalog::{catalog_registry, MediaModel};
use geek_db::{MediaService, OperationError};
use geek_query::{Page, PageRequest, RequestedFields};

use crate::cli_types::SearchArgs;
use crate::CliError;

use super::{open_existing_catalog, truncate_str};

pub(crate) fn run_search(db_path: &Path, args: SearchArgs, default_size: u32) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(db_path)? else {
        return Ok(());
    };
    let registry = catalog_registry();
    let service = MediaService::new(&conn, &registry);

    let page = PageRequest::of(args.page, args.size.unwrap_or(default_size));
    let requested: RequestedFields = args
        .fields
        .iter()
        .map(|f| (f.trim().to_string(), Vec::new()))
        .collect();

    let result = match args.kind {
        Some(kind) => service
            .find_by_id_or_name(kind, args.id, args.name.as_deref(), &requested, page)
            .map_err(|e| match e {
                OperationError::NotFound { .. } => CliError::not_found(format!(
                    "category {} has not been imported",
                    kind.label()
                )),
                other => CliError::database(format!("Search failed: {}", other)),
            })?,
        None => service
            .repository()
            .search_media(
                args.name.as_deref(),
                args.alt.as_deref(),
                args.category,
                &requested,
                page,
            )
            .map_err(|e| CliError::database(format!("Search failed: {}", e)))?,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::database(format!("Failed to serialize results: {}", e)))?;
        println!("{json}");
        return Ok(());
    }

    print_page(&result);
    Ok(())
}

fn print_page(page: &Page<MediaModel>) {
    if page.total_elements == 0 {
        log::info!("{}", "No matches.".if_supports_color(Stdout, |t| t.dimmed()));
        return;
    }

    for media in &page.content {
        let id = media.id.map(|i| i.to_string()).unwrap_or_default();
        let name = media.name.as_deref().unwrap_or("?");
        log::info!(
            "  {:>6}  {}",
            id.if_supports_color(Stdout, |t| t.dimmed()),
            name.if_supports_color(Stdout, |t| t.bold()),
        );
        if let Some(about) = media.about.as_deref() {
            log::info!("          {}", truncate_str(about, 70));
        }
    }

    crate::log_blank();
    let first = page.page.offset() + 1;
    let last = page.page.offset() + page.content.len() as u64;
    if page.is_empty() {
        log::info!(
            "Page {} is past the end ({} matches, {} pages)",
            page.page.number(),
            page.total_elements,
            page.total_pages(),
        );
    } else {
        log::info!(
            "Showing {}-{} of {} (page {} of {})",
            first,
            last,
            page.total_elements.if_supports_color(Stdout, |t| t.cyan()),
            page.page.number() + 1,
            page.total_pages(),
        );
    }
    if page.has_next() {
        log::info!(
            "{}",
            format!("Next: --page {}", page.page.number() + 1)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
