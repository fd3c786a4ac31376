//! SQLite persistence layer for the media catalog.
//!
//! Provides schema creation, CRUD operations, and the paged search backed
//! by SQLite (via rusqlite with bundled feature).

pub mod executor;
pub mod operations;
pub mod queries;
pub mod repository;
pub mod schema;
pub mod service;

pub use executor::SqliteExecutor;
pub use operations::{
    add_alternative_title, add_external_reference, alternative_titles_for_media,
    external_references_for_media, find_category_by_id, find_media_by_external_reference,
    find_media_by_id, find_media_by_id_eager, insert_media, media_exists, random_banner,
    save_all, save_media, seed_from_catalog, upsert_category, upsert_type_reference,
    OperationError, SeedStats,
};
pub use queries::{catalog_stats, list_categories, CatalogStats, CategoryRow};
pub use repository::MediaRepository;
pub use schema::{open_database, open_memory, SchemaError};
pub use service::MediaService;
pub use rusqlite::Connection;
