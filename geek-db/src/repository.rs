//! Paged search over the catalog tables.

use geek_catalog::MediaModel;
use geek_query::{
    Entity, EntityRegistry, Page, PageRequest, RequestedFields, SearchEngine, SearchRequest,
};
use rusqlite::Connection;

use crate::executor::SqliteExecutor;
use crate::operations::OperationError;

/// Search entry point for media and any other registered entity.
pub struct MediaRepository<'a> {
    engine: SearchEngine<'a, SqliteExecutor<'a>>,
}

impl<'a> MediaRepository<'a> {
    pub fn new(conn: &'a Connection, registry: &'a EntityRegistry) -> Self {
        Self {
            engine: SearchEngine::new(registry, SqliteExecutor::new(conn)),
        }
    }

    /// Media whose name contains `name` and that have an alternative title
    /// containing `alternative_title` (both case-insensitive), restricted to
    /// `category_id`. Absent or blank filters are not applied.
    pub fn search_media(
        &self,
        name: Option<&str>,
        alternative_title: Option<&str>,
        category_id: Option<i32>,
        requested_fields: &RequestedFields,
        page: PageRequest,
    ) -> Result<Page<MediaModel>, OperationError> {
        let request = SearchRequest {
            name: name.map(str::to_string),
            alternative_title: alternative_title.map(str::to_string),
            category_id: category_id.map(i64::from),
            requested_fields: requested_fields.clone(),
            page,
        };
        self.search(&request)
    }

    pub fn search<E: Entity>(&self, request: &SearchRequest) -> Result<Page<E>, OperationError> {
        Ok(self.engine.search::<E>(request)?)
    }
}
