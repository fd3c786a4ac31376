//! Data model types for the media catalog.
//!
//! Every entity field is optional or empty by default: search results only
//! populate the projected fields, and callers must not rely on the rest.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ── Category ids ────────────────────────────────────────────────────────────

pub const SERIE_ID: i32 = 1;
pub const GAME_ID: i32 = 2;
pub const VN_ID: i32 = 3;
pub const MOVIE_ID: i32 = 4;

/// Kind of media, one per seeded category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Serie,
    Game,
    Vn,
    Movie,
}

impl MediaKind {
    pub fn category_id(self) -> i32 {
        match self {
            MediaKind::Serie => SERIE_ID,
            MediaKind::Game => GAME_ID,
            MediaKind::Vn => VN_ID,
            MediaKind::Movie => MOVIE_ID,
        }
    }

    pub fn from_category_id(id: i32) -> Option<Self> {
        match id {
            SERIE_ID => Some(MediaKind::Serie),
            GAME_ID => Some(MediaKind::Game),
            VN_ID => Some(MediaKind::Vn),
            MOVIE_ID => Some(MediaKind::Movie),
            _ => None,
        }
    }

    /// Parse a loose user-provided name (e.g. "games", "series", "visual novel").
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "serie" | "series" | "tv" | "show" => Some(MediaKind::Serie),
            "game" | "games" => Some(MediaKind::Game),
            "vn" | "visual novel" | "visual-novel" | "visualnovel" => Some(MediaKind::Vn),
            "movie" | "movies" | "film" => Some(MediaKind::Movie),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Serie => "Serie",
            MediaKind::Game => "Game",
            MediaKind::Vn => "Visual Novel",
            MediaKind::Movie => "Movie",
        }
    }
}

// ── Media ───────────────────────────────────────────────────────────────────

/// A catalogued media item: a game, serie, movie, or visual novel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_season: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_category: Option<MediaCategoryModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_titles: Vec<AlternativeTitleModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<ExternalReferenceModel>,
}

impl MediaModel {
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref().filter(|b| !b.is_empty())
    }

    pub fn kind(&self) -> Option<MediaKind> {
        self.media_category
            .as_ref()
            .and_then(|c| c.id)
            .and_then(MediaKind::from_category_id)
    }
}

/// Category a media belongs to (game, serie, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCategoryModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_category: Option<String>,
}

/// Another name a media is known by (localized or former titles).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeTitleModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Owning media; the back reference itself is not materialized.
    #[serde(skip)]
    pub media_id: Option<i32>,
}

/// Identifier of a media in an external provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalReferenceModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip)]
    pub media_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_reference: Option<TypeReferenceModel>,
}

/// External provider an [`ExternalReferenceModel`] points into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReferenceModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_reference: Option<String>,
}

/// Role a person plays in a production (director, voice actor, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypePersonModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_type_person: Option<String>,
}
