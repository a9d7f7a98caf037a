//! ROM catalog and category management for Romshelf
//!
//! Builds the item catalog from the asset bundle, enriches it from the
//! `games.json` side table and keeps the user's favorites and recently
//! played lists in a durable preference store.

mod assets;
mod catalog;
mod database;
mod item;
mod library;
mod metadata;
mod preferences;
mod search;

pub use assets::{AssetSource, DirectoryAssets, IMAGES_DIR, METADATA_FILE, ROMS_DIR, StaticAssets};
pub use catalog::Catalog;
pub use database::SqlitePreferenceStore;
pub use item::{
    Classification, Item, UNKNOWN_DEVELOPER, UNKNOWN_PUBLISHER, UNKNOWN_YEAR, display_name,
};
pub use library::{CategoryChange, ChangeKind, Library};
pub use metadata::{GameMetadata, MetadataTable};
pub use preferences::{
    LEGACY_SEPARATOR, MemoryPreferenceStore, PreferenceStore, decode_legacy, encode_legacy,
};
pub use search::filter_by_rom;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Invalid ROM path {0:?}: contains the list separator")]
    InvalidRomPath(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// The four fixed categories
///
/// Declaration order is the order categories are presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Every playable ROM, recomputed from the catalog
    AllGames,
    /// Recently launched items, most recent first
    Recent,
    /// User favorites in insertion order
    Favorites,
    /// Every audio-only file, recomputed from the catalog
    Music,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::AllGames,
        Category::Recent,
        Category::Favorites,
        Category::Music,
    ];

    /// Categories backed by the preference store
    pub const VOLATILE: [Category; 2] = [Category::Favorites, Category::Recent];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Category::AllGames => "All Games",
            Category::Recent => "Recent",
            Category::Favorites => "Favorites",
            Category::Music => "Music",
        }
    }

    /// Preference store key, `None` for derived categories
    pub fn store_key(&self) -> Option<&'static str> {
        match self {
            Category::Favorites => Some("favorites"),
            Category::Recent => Some("recent"),
            Category::AllGames | Category::Music => None,
        }
    }

    pub fn is_volatile(&self) -> bool {
        self.store_key().is_some()
    }

    /// Whether name search is supported for this category
    pub fn is_searchable(&self) -> bool {
        matches!(self, Category::AllGames | Category::Music)
    }

    /// Lenient lookup by display name or store key
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name || c.store_key() == Some(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LibraryError::UnknownCategory(s.to_string()))
    }
}
