//! Media lookups as exposed to callers: by id, or by name within a category.

use geek_catalog::{MediaKind, MediaModel};
use geek_query::{EntityRegistry, Page, PageRequest, RequestedFields};
use rusqlite::Connection;

use crate::operations::{self, OperationError};
use crate::repository::MediaRepository;

pub struct MediaService<'a> {
    conn: &'a Connection,
    repository: MediaRepository<'a>,
}

impl<'a> MediaService<'a> {
    pub fn new(conn: &'a Connection, registry: &'a EntityRegistry) -> Self {
        Self {
            conn,
            repository: MediaRepository::new(conn, registry),
        }
    }

    pub fn repository(&self) -> &MediaRepository<'a> {
        &self.repository
    }

    pub fn find_serie_by_id_or_name(
        &self,
        id: Option<i32>,
        name: Option<&str>,
        requested_fields: &RequestedFields,
        page: PageRequest,
    ) -> Result<Page<MediaModel>, OperationError> {
        self.find_by_id_or_name(MediaKind::Serie, id, name, requested_fields, page)
    }

    pub fn find_game_by_id_or_name(
        &self,
        id: Option<i32>,
        name: Option<&str>,
        requested_fields: &RequestedFields,
        page: PageRequest,
    ) -> Result<Page<MediaModel>, OperationError> {
        self.find_by_id_or_name(MediaKind::Game, id, name, requested_fields, page)
    }

    pub fn find_movie_by_id_or_name(
        &self,
        id: Option<i32>,
        name: Option<&str>,
        requested_fields: &RequestedFields,
        page: PageRequest,
    ) -> Result<Page<MediaModel>, OperationError> {
        self.find_by_id_or_name(MediaKind::Movie, id, name, requested_fields, page)
    }

    pub fn find_vn_by_id_or_name(
        &self,
        id: Option<i32>,
        name: Option<&str>,
        requested_fields: &RequestedFields,
        page: PageRequest,
    ) -> Result<Page<MediaModel>, OperationError> {
        self.find_by_id_or_name(MediaKind::Vn, id, name, requested_fields, page)
    }

    /// With an id, a single-element page holding that media (empty when the
    /// id is unknown). Otherwise a search of `kind` where both the name and
    /// an alternative title contain `name`.
    ///
    /// Fails with `NotFound` when the category of `kind` has not been seeded.
    pub fn find_by_id_or_name(
        &self,
        kind: MediaKind,
        id: Option<i32>,
        name: Option<&str>,
        requested_fields: &RequestedFields,
        page: PageRequest,
    ) -> Result<Page<MediaModel>, OperationError> {
        if let Some(id) = id {
            let found: Vec<MediaModel> = self.find_by_id(id)?.into_iter().collect();
            let total = found.len() as u64;
            return Ok(Page::new(found, PageRequest::new(0, 1), total));
        }

        let category = kind.category_id();
        if operations::find_category_by_id(self.conn, category)?.is_none() {
            return Err(OperationError::not_found("medias_category", category));
        }

        self.repository
            .search_media(name, name, Some(category), requested_fields, page)
    }

    pub fn find_by_id(&self, id: i32) -> Result<Option<MediaModel>, OperationError> {
        operations::find_media_by_id(self.conn, id)
    }

    pub fn find_by_id_eager(&self, id: i32) -> Result<Option<MediaModel>, OperationError> {
        operations::find_media_by_id_eager(self.conn, id)
    }

    pub fn save(&self, media: &MediaModel) -> Result<i32, OperationError> {
        operations::save_media(self.conn, media)
    }

    pub fn save_all(&self, medias: &[MediaModel]) -> Result<Vec<i32>, OperationError> {
        operations::save_all(self.conn, medias)
    }

    /// Banner of a random media, for splash screens.
    pub fn random_artwork(&self) -> Result<Option<String>, OperationError> {
        operations::random_banner(self.conn)
    }
}
