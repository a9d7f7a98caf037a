//! Catalog construction from an asset bundle

use crate::assets::{AssetSource, IMAGES_DIR, ROMS_DIR};
use crate::item::{Item, display_name};
use crate::metadata::MetadataTable;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Every item in the asset bundle, unique by ROM path
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Arc<Item>>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build the catalog
    ///
    /// Listing failures count as an empty listing and a missing or broken
    /// metadata document leaves items unenriched. Nothing here fails.
    pub fn load(source: &dyn AssetSource, image_extension: &str) -> Self {
        let roms = source.list_roms().unwrap_or_else(|e| {
            tracing::warn!("Could not list ROMs: {}", e);
            Vec::new()
        });
        if roms.is_empty() {
            tracing::warn!("No ROMs found");
        }

        let images: HashSet<String> = source
            .list_images()
            .unwrap_or_else(|e| {
                tracing::debug!("Could not list images: {}", e);
                Vec::new()
            })
            .into_iter()
            .collect();

        let metadata = match source.read_metadata() {
            Ok(bytes) => MetadataTable::parse(&bytes),
            Err(e) => {
                tracing::warn!("Could not read metadata: {}", e);
                MetadataTable::default()
            }
        };

        let mut catalog = Self::default();
        for file in roms {
            let mut item = Item::new(format!("{}/{}", ROMS_DIR, file));

            let image_file = format!("{}.{}", display_name(&file), image_extension);
            if images.contains(&image_file) {
                item = item.with_image(format!("{}/{}", IMAGES_DIR, image_file));
            }

            if let Some(info) = metadata.get(item.name()) {
                item.enrich(info);
            }

            catalog.insert(item);
        }

        tracing::info!(
            "Catalog loaded: {} items ({} enriched from metadata)",
            catalog.len(),
            catalog.items.iter().filter(|i| i.developer().is_some() || i.year().is_some()).count()
        );
        catalog
    }

    /// Build a catalog from ready-made items, first occurrence wins
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    fn insert(&mut self, item: Item) {
        if self.index.contains_key(item.rom()) {
            tracing::debug!("Skipping duplicate ROM {}", item.rom());
            return;
        }
        self.index.insert(item.rom().to_string(), self.items.len());
        self.items.push(Arc::new(item));
    }

    /// Look up an item by ROM path
    pub fn get(&self, rom: &str) -> Option<&Arc<Item>> {
        self.index.get(rom).map(|&idx| &self.items[idx])
    }

    pub fn contains(&self, rom: &str) -> bool {
        self.index.contains_key(rom)
    }

    /// All items in enumeration order
    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    /// Playable items in enumeration order
    pub fn playable(&self) -> Vec<Arc<Item>> {
        self.items.iter().filter(|i| i.is_playable()).cloned().collect()
    }

    /// Audio items in enumeration order
    pub fn audio(&self) -> Vec<Arc<Item>> {
        self.items.iter().filter(|i| i.is_audio()).cloned().collect()
    }

    /// Resolve ROM paths to catalog items, keeping order
    ///
    /// Unknown and repeated paths are dropped.
    pub fn resolve<'a>(&self, roms: impl IntoIterator<Item = &'a str>) -> Vec<Arc<Item>> {
        let mut seen = HashSet::new();
        roms.into_iter()
            .filter(|rom| seen.insert(*rom))
            .filter_map(|rom| {
                let item = self.get(rom);
                if item.is_none() {
                    tracing::debug!("Dropping stale entry {}", rom);
                }
                item.cloned()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
