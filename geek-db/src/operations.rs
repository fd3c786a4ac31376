//! CRUD operations for catalog entities.

use geek_catalog::{
    AlternativeTitleModel, CatalogSeed, ExternalReferenceModel, MediaCategoryModel, MediaModel,
    MediaSeed, TypeReferenceModel,
};
use geek_query::QueryError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Search failed: {0}")]
    Query(#[from] QueryError),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

impl OperationError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

// ── Category Operations ─────────────────────────────────────────────────────

/// Insert a category or rename an existing one.
pub fn upsert_category(conn: &Connection, id: i32, type_category: &str) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO medias_category (id_media_category, type_category) VALUES (?1, ?2)
         ON CONFLICT(id_media_category) DO UPDATE SET type_category = excluded.type_category",
        params![id, type_category],
    )?;
    Ok(())
}

pub fn find_category_by_id(
    conn: &Connection,
    id: i32,
) -> Result<Option<MediaCategoryModel>, OperationError> {
    Ok(conn
        .query_row(
            "SELECT id_media_category, type_category FROM medias_category WHERE id_media_category = ?1",
            [id],
            |row| {
                Ok(MediaCategoryModel {
                    id: row.get(0)?,
                    type_category: row.get(1)?,
                })
            },
        )
        .optional()?)
}

// ── Media Operations ────────────────────────────────────────────────────────

/// Insert a new media with its alternative titles. Returns the media id.
///
/// An explicit `media.id` is kept; otherwise SQLite assigns one.
pub fn insert_media(conn: &Connection, media: &MediaModel) -> Result<i32, OperationError> {
    conn.execute(
        "INSERT INTO medias (id_media, name_media, about, cover, banner, total_season, update_at, id_media_category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'), ?7)",
        params![
            media.id,
            media.name.as_deref().unwrap_or_default(),
            media.about,
            media.cover,
            media.banner,
            media.total_season,
            category_of(media),
        ],
    )?;
    let id = last_id(conn)?;

    for title in &media.alternative_titles {
        if let Some(name) = title.name.as_deref() {
            add_alternative_title(conn, id, name)?;
        }
    }
    Ok(id)
}

/// Insert `media` if it has no id or its id is unknown, otherwise overwrite
/// the stored row. Alternative titles are replaced wholesale on update.
pub fn save_media(conn: &Connection, media: &MediaModel) -> Result<i32, OperationError> {
    let id = match media.id {
        Some(id) if media_exists(conn, id)? => id,
        _ => return insert_media(conn, media),
    };

    conn.execute(
        "UPDATE medias SET name_media = ?2, about = ?3, cover = ?4, banner = ?5,
             total_season = ?6, update_at = datetime('now'), id_media_category = ?7
         WHERE id_media = ?1",
        params![
            id,
            media.name.as_deref().unwrap_or_default(),
            media.about,
            media.cover,
            media.banner,
            media.total_season,
            category_of(media),
        ],
    )?;

    conn.execute("DELETE FROM alternative_titles WHERE id_media = ?1", [id])?;
    for title in &media.alternative_titles {
        if let Some(name) = title.name.as_deref() {
            add_alternative_title(conn, id, name)?;
        }
    }
    Ok(id)
}

/// Save every media in one transaction. Returns ids in input order.
pub fn save_all(conn: &Connection, medias: &[MediaModel]) -> Result<Vec<i32>, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let ids = medias
        .iter()
        .map(|m| save_media(&tx, m))
        .collect::<Result<Vec<_>, _>>()?;
    tx.commit()?;
    Ok(ids)
}

pub fn add_alternative_title(
    conn: &Connection,
    media_id: i32,
    title: &str,
) -> Result<i32, OperationError> {
    conn.execute(
        "INSERT INTO alternative_titles (name_title, id_media) VALUES (?1, ?2)",
        params![title, media_id],
    )?;
    last_id(conn)
}

pub fn media_exists(conn: &Connection, id: i32) -> Result<bool, OperationError> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM medias WHERE id_media = ?1)",
        [id],
        |row| row.get(0),
    )?)
}

/// Look up a media with its category. Collections are left empty.
pub fn find_media_by_id(conn: &Connection, id: i32) -> Result<Option<MediaModel>, OperationError> {
    Ok(conn
        .query_row(
            &format!("{MEDIA_SELECT} WHERE m.id_media = ?1"),
            [id],
            row_to_media,
        )
        .optional()?)
}

/// Look up a media with its category, alternative titles, and external references.
pub fn find_media_by_id_eager(
    conn: &Connection,
    id: i32,
) -> Result<Option<MediaModel>, OperationError> {
    let Some(mut media) = find_media_by_id(conn, id)? else {
        return Ok(None);
    };
    media.alternative_titles = alternative_titles_for_media(conn, id)?;
    media.external_references = external_references_for_media(conn, id)?;
    Ok(Some(media))
}

pub fn alternative_titles_for_media(
    conn: &Connection,
    media_id: i32,
) -> Result<Vec<AlternativeTitleModel>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id_alternative_title, name_title, id_media FROM alternative_titles
         WHERE id_media = ?1 ORDER BY id_alternative_title",
    )?;
    let rows = stmt.query_map([media_id], |row| {
        Ok(AlternativeTitleModel {
            id: row.get(0)?,
            name: row.get(1)?,
            media_id: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// A random non-empty banner, if any media has one.
pub fn random_banner(conn: &Connection) -> Result<Option<String>, OperationError> {
    Ok(conn
        .query_row(
            "SELECT banner FROM medias WHERE banner IS NOT NULL AND banner <> ''
             ORDER BY RANDOM() LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?)
}

// ── External Reference Operations ───────────────────────────────────────────

pub fn upsert_type_reference(
    conn: &Connection,
    id: i32,
    name_reference: &str,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO type_references (id_type_reference, name_reference) VALUES (?1, ?2)
         ON CONFLICT(id_type_reference) DO UPDATE SET name_reference = excluded.name_reference",
        params![id, name_reference],
    )?;
    Ok(())
}

/// Link `media_id` to `reference` in provider `type_reference_id`.
/// Re-linking an existing reference moves it to the new media.
pub fn add_external_reference(
    conn: &Connection,
    media_id: i32,
    reference: &str,
    type_reference_id: i32,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO external_references (reference, id_media, id_type_reference) VALUES (?1, ?2, ?3)
         ON CONFLICT(reference, id_type_reference) DO UPDATE SET id_media = excluded.id_media",
        params![reference, media_id, type_reference_id],
    )?;
    Ok(())
}

pub fn external_references_for_media(
    conn: &Connection,
    media_id: i32,
) -> Result<Vec<ExternalReferenceModel>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT r.id_external_reference, r.reference, r.id_media, t.id_type_reference, t.name_reference
         FROM external_references r
         JOIN type_references t ON t.id_type_reference = r.id_type_reference
         WHERE r.id_media = ?1 ORDER BY r.id_external_reference",
    )?;
    let rows = stmt.query_map([media_id], |row| {
        Ok(ExternalReferenceModel {
            id: row.get(0)?,
            reference: row.get(1)?,
            media_id: row.get(2)?,
            type_reference: Some(TypeReferenceModel {
                id: row.get(3)?,
                name_reference: row.get(4)?,
            }),
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Find the media an external provider knows as `reference`.
pub fn find_media_by_external_reference(
    conn: &Connection,
    reference: &str,
    type_reference_id: i32,
) -> Result<Option<MediaModel>, OperationError> {
    Ok(conn
        .query_row(
            &format!(
                "{MEDIA_SELECT}
                 JOIN external_references r ON r.id_media = m.id_media
                 WHERE r.reference = ?1 AND r.id_type_reference = ?2"
            ),
            params![reference, type_reference_id],
            row_to_media,
        )
        .optional()?)
}

// ── Seeding ─────────────────────────────────────────────────────────────────

/// Load a parsed seed into the database.
///
/// Re-running a seed does not duplicate anything: media are matched by id,
/// or by name and category when the seed gives no id, and titles already
/// recorded for a media are skipped.
pub fn seed_from_catalog(conn: &Connection, seed: &CatalogSeed) -> Result<SeedStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = SeedStats::default();

    for category in &seed.categories {
        upsert_category(&tx, category.id, &category.type_category)?;
        stats.categories += 1;
    }

    for entry in &seed.media {
        if find_category_by_id(&tx, entry.category)?.is_none() {
            log::warn!(
                "Skipping '{}': unknown category {}",
                entry.name,
                entry.category
            );
            stats.skipped += 1;
            continue;
        }

        let existing = match entry.id {
            Some(id) => media_exists(&tx, id)?.then_some(id),
            None => find_media_id_by_name(&tx, &entry.name, entry.category)?,
        };
        let model = media_from_seed(entry);
        let id = match existing {
            Some(id) => {
                stats.updated += 1;
                merge_media_columns(&tx, id, &model)?
            }
            None => {
                stats.inserted += 1;
                insert_media(&tx, &model)?
            }
        };

        let known: Vec<String> = alternative_titles_for_media(&tx, id)?
            .into_iter()
            .filter_map(|t| t.name)
            .collect();
        for title in &entry.alternative_titles {
            if !known.iter().any(|k| k == title) {
                add_alternative_title(&tx, id, title)?;
                stats.alternative_titles += 1;
            }
        }
    }

    tx.commit()?;
    Ok(stats)
}

/// Statistics from seeding the database.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedStats {
    pub categories: usize,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub alternative_titles: usize,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

const MEDIA_SELECT: &str =
    "SELECT m.id_media, m.name_media, m.about, m.cover, m.banner, m.total_season, m.update_at,
            c.id_media_category, c.type_category
     FROM medias m
     LEFT JOIN medias_category c ON c.id_media_category = m.id_media_category";

fn row_to_media(row: &Row) -> rusqlite::Result<MediaModel> {
    let category_id: Option<i32> = row.get(7)?;
    let type_category: Option<String> = row.get(8)?;
    Ok(MediaModel {
        id: row.get(0)?,
        name: row.get(1)?,
        about: row.get(2)?,
        cover: row.get(3)?,
        banner: row.get(4)?,
        total_season: row.get(5)?,
        update_at: row.get(6)?,
        media_category: category_id.map(|id| MediaCategoryModel {
            id: Some(id),
            type_category,
        }),
        ..MediaModel::default()
    })
}

fn category_of(media: &MediaModel) -> Option<i32> {
    media.media_category.as_ref().and_then(|c| c.id)
}

fn last_id(conn: &Connection) -> Result<i32, OperationError> {
    let rowid = conn.last_insert_rowid();
    Ok(i32::try_from(rowid).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(0, rowid))?)
}

fn find_media_id_by_name(
    conn: &Connection,
    name: &str,
    category: i32,
) -> Result<Option<i32>, OperationError> {
    Ok(conn
        .query_row(
            "SELECT id_media FROM medias WHERE name_media = ?1 AND id_media_category = ?2
             ORDER BY id_media LIMIT 1",
            params![name, category],
            |row| row.get(0),
        )
        .optional()?)
}

/// Overwrite the columns `media` provides, keeping the rest and the titles.
fn merge_media_columns(conn: &Connection, id: i32, media: &MediaModel) -> Result<i32, OperationError> {
    conn.execute(
        "UPDATE medias SET name_media = ?2,
             about = COALESCE(?3, about), cover = COALESCE(?4, cover),
             banner = COALESCE(?5, banner), total_season = COALESCE(?6, total_season),
             update_at = datetime('now'), id_media_category = ?7
         WHERE id_media = ?1",
        params![
            id,
            media.name.as_deref().unwrap_or_default(),
            media.about,
            media.cover,
            media.banner,
            media.total_season,
            category_of(media),
        ],
    )?;
    Ok(id)
}

fn media_from_seed(entry: &MediaSeed) -> MediaModel {
    MediaModel {
        id: entry.id,
        name: Some(entry.name.clone()),
        about: entry.about.clone(),
        cover: entry.cover.clone(),
        banner: entry.banner.clone(),
        total_season: entry.total_season,
        media_category: Some(MediaCategoryModel {
            id: Some(entry.category),
            type_category: None,
        }),
        ..MediaModel::default()
    }
}
