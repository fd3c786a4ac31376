//! Media catalog data model, entity metadata declarations, and YAML seeds.
//!
//! This crate defines the catalog's entities (media, categories, alternative
//! titles, external references) without any database dependency. Each entity
//! declares its table layout for the `geek-query` engine; `geek-db` persists
//! them.

pub mod entity;
pub mod types;
pub mod yaml;

pub use entity::catalog_registry;
pub use types::*;
pub use yaml::{load_seed, load_seed_dir, load_seed_path, CatalogSeed, CategorySeed, MediaSeed, SeedError};
