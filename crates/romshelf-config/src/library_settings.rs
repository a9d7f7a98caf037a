//! Catalog and preference store settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the catalog comes from and where user lists are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Asset bundle root holding `roms/`, `images/` and `games.json`
    pub assets_dir: PathBuf,

    /// SQLite file backing favorites and recent lists
    pub database_path: PathBuf,

    /// Maximum number of entries kept in the recent list
    pub recent_limit: usize,

    /// Extension of cover images next to each ROM basename
    pub image_extension: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("/roms/nes"),
            database_path: PathBuf::from("/roms/.romshelf/preferences.db"),
            recent_limit: 20,
            image_extension: "jpg".to_string(),
        }
    }
}
