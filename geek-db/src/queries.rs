//! Read-only listing and statistics queries.

use rusqlite::Connection;

use crate::operations::OperationError;

// ── Categories ──────────────────────────────────────────────────────────────

/// Every category with the number of media filed under it.
pub fn list_categories(conn: &Connection) -> Result<Vec<CategoryRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT c.id_media_category, c.type_category, COUNT(m.id_media)
         FROM medias_category c
         LEFT JOIN medias m ON m.id_media_category = c.id_media_category
         GROUP BY c.id_media_category, c.type_category
         ORDER BY c.id_media_category",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(CategoryRow {
            id: row.get(0)?,
            type_category: row.get(1)?,
            media_count: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: i32,
    pub type_category: String,
    pub media_count: i64,
}

// ── Statistics ──────────────────────────────────────────────────────────────

pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |sql: &str| -> rusqlite::Result<i64> { conn.query_row(sql, [], |r| r.get(0)) };

    Ok(CatalogStats {
        categories: count("SELECT COUNT(*) FROM medias_category")?,
        media: count("SELECT COUNT(*) FROM medias")?,
        alternative_titles: count("SELECT COUNT(*) FROM alternative_titles")?,
        external_references: count("SELECT COUNT(*) FROM external_references")?,
        with_banner: count("SELECT COUNT(*) FROM medias WHERE banner IS NOT NULL AND banner <> ''")?,
        uncategorized: count("SELECT COUNT(*) FROM medias WHERE id_media_category IS NULL")?,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub categories: i64,
    pub media: i64,
    pub alternative_titles: i64,
    pub external_references: i64,
    pub with_banner: i64,
    pub uncategorized: i64,
}
