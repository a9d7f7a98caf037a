//! Asset bundle enumeration

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory holding ROM and music files
pub const ROMS_DIR: &str = "roms";

/// Directory holding cover images
pub const IMAGES_DIR: &str = "images";

/// Metadata side table
pub const METADATA_FILE: &str = "games.json";

/// Read access to the asset bundle the catalog is built from
pub trait AssetSource {
    /// File names under the ROM directory, in enumeration order
    fn list_roms(&self) -> io::Result<Vec<String>>;

    /// File names under the image directory
    fn list_images(&self) -> io::Result<Vec<String>>;

    /// Raw bytes of the metadata document
    fn read_metadata(&self) -> io::Result<Vec<u8>>;
}

/// Asset bundle laid out on disk
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List file names in a directory, sorted
    ///
    /// Symlinks to files count as files. Unreadable entries are skipped.
    fn list_files(dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

impl AssetSource for DirectoryAssets {
    fn list_roms(&self) -> io::Result<Vec<String>> {
        Self::list_files(&self.root.join(ROMS_DIR))
    }

    fn list_images(&self) -> io::Result<Vec<String>> {
        Self::list_files(&self.root.join(IMAGES_DIR))
    }

    fn read_metadata(&self) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(METADATA_FILE))
    }
}

/// Fixed in-memory asset bundle
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    roms: Vec<String>,
    images: Vec<String>,
    metadata: Option<Vec<u8>>,
}

impl StaticAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add ROM file names
    pub fn with_roms<I, S>(mut self, roms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roms.extend(roms.into_iter().map(Into::into));
        self
    }

    /// Add image file names
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images.extend(images.into_iter().map(Into::into));
        self
    }

    /// Set the metadata document
    pub fn with_metadata(mut self, metadata: impl Into<Vec<u8>>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }
}

impl AssetSource for StaticAssets {
    fn list_roms(&self) -> io::Result<Vec<String>> {
        Ok(self.roms.clone())
    }

    fn list_images(&self) -> io::Result<Vec<String>> {
        Ok(self.images.clone())
    }

    fn read_metadata(&self) -> io::Result<Vec<u8>> {
        self.metadata
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, METADATA_FILE))
    }
}
