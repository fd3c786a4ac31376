//! YAML seed files for bootstrapping a catalog.
//!
//! A seed file lists categories and media, each media with its category id
//! and alternative titles:
//!
//! ```yaml
//! categories:
//!   - id: 2
//!     type_category: Game
//! media:
//!   - name: Dragon Quest
//!     category: 2
//!     alternative_titles: ["Dragon Warrior"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeed {
    pub id: i32,
    pub type_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSeed {
    #[serde(default)]
    pub id: Option<i32>,
    pub name: String,
    pub category: i32,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub total_season: Option<i32>,
    #[serde(default)]
    pub alternative_titles: Vec<String>,
}

/// Contents of one or more seed files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
    #[serde(default)]
    pub media: Vec<MediaSeed>,
}

impl CatalogSeed {
    pub fn merge(&mut self, other: CatalogSeed) {
        self.categories.extend(other.categories);
        self.media.extend(other.media);
    }
}

/// Load a single seed file.
pub fn load_seed(path: &Path) -> Result<CatalogSeed, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SeedError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| SeedError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load and merge every `.yaml`/`.yml` file in `dir`, in file-name order.
pub fn load_seed_dir(dir: &Path) -> Result<CatalogSeed, SeedError> {
    if !dir.is_dir() {
        return Err(SeedError::DirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| SeedError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut seed = CatalogSeed::default();
    for entry in entries {
        seed.merge(load_seed(&entry.path())?);
    }
    Ok(seed)
}

/// Load a seed from a file or a directory of files.
pub fn load_seed_path(path: &Path) -> Result<CatalogSeed, SeedError> {
    if path.is_dir() {
        load_seed_dir(path)
    } else {
        load_seed(path)
    }
}
