//! SQLite schema creation and migration.

use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 2;

/// Statements upgrading the schema from version `index + 1` to `index + 2`.
const MIGRATIONS: &[&str] = &["ALTER TABLE medias ADD COLUMN banner TEXT;"];

/// Create all tables and indexes if they don't exist. Running it twice is harmless.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    record_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open (creating if needed) the catalog database at `path`, bringing its
/// schema up to [`CURRENT_VERSION`].
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path.as_ref())?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    register_functions(&conn)?;

    match schema_version(&conn)? {
        0 => create_schema(&conn)?,
        CURRENT_VERSION => {}
        found => migrate(&conn, found)?,
    }

    log::debug!("opened catalog database {}", path.as_ref().display());
    Ok(conn)
}

/// Fresh in-memory catalog, mostly for tests.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    register_functions(&conn)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Replace SQLite's ASCII-only `lower()` with one that folds all of Unicode,
/// matching how search patterns are lowercased before binding.
pub fn register_functions(conn: &Connection) -> Result<(), SchemaError> {
    conn.create_scalar_function(
        "lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            Ok(match ctx.get_raw(0) {
                ValueRef::Null | ValueRef::Blob(_) => None,
                ValueRef::Integer(n) => Some(n.to_string()),
                ValueRef::Real(r) => Some(r.to_string()),
                ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).to_lowercase()),
            })
        },
    )?;
    Ok(())
}

/// Highest recorded schema version, or 0 for an empty database.
pub fn schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }

    Ok(conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?)
}

fn record_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Apply every migration after `from_version`.
pub fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if !(1..=CURRENT_VERSION).contains(&from_version) {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    for version in from_version..CURRENT_VERSION {
        log::info!("migrating catalog schema {} -> {}", version, version + 1);
        conn.execute_batch(MIGRATIONS[(version - 1) as usize])?;
        record_version(conn, version + 1)?;
    }
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Media categories (serie, game, visual novel, movie)
CREATE TABLE IF NOT EXISTS medias_category (
    id_media_category INTEGER PRIMARY KEY,
    type_category TEXT NOT NULL
);

-- Catalogued media
CREATE TABLE IF NOT EXISTS medias (
    id_media INTEGER PRIMARY KEY AUTOINCREMENT,
    name_media TEXT NOT NULL,
    about TEXT,
    cover TEXT,
    banner TEXT,
    total_season INTEGER,
    update_at TEXT,
    id_media_category INTEGER REFERENCES medias_category(id_media_category)
);
CREATE INDEX IF NOT EXISTS idx_medias_category ON medias(id_media_category);
CREATE INDEX IF NOT EXISTS idx_medias_name ON medias(name_media);

-- Other names a media is known by
CREATE TABLE IF NOT EXISTS alternative_titles (
    id_alternative_title INTEGER PRIMARY KEY AUTOINCREMENT,
    name_title TEXT NOT NULL,
    id_media INTEGER NOT NULL REFERENCES medias(id_media) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_alternative_titles_media ON alternative_titles(id_media);

-- External metadata providers
CREATE TABLE IF NOT EXISTS type_references (
    id_type_reference INTEGER PRIMARY KEY,
    name_reference TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS external_references (
    id_external_reference INTEGER PRIMARY KEY AUTOINCREMENT,
    reference TEXT NOT NULL,
    id_media INTEGER NOT NULL REFERENCES medias(id_media) ON DELETE CASCADE,
    id_type_reference INTEGER NOT NULL REFERENCES type_references(id_type_reference),
    UNIQUE(reference, id_type_reference)
);

-- Roles of people credited on a media
CREATE TABLE IF NOT EXISTS types_person (
    id INTEGER PRIMARY KEY,
    name_type_person TEXT NOT NULL
);
"#;
