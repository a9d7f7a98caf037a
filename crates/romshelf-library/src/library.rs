//! Category store: derived and user-ordered categories over the catalog

use crate::assets::AssetSource;
use crate::catalog::Catalog;
use crate::item::Item;
use crate::preferences::PreferenceStore;
use crate::{Category, LibraryError};
use romshelf_config::LibrarySettings;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

/// How a volatile category changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Item added, or moved to the front of the recent list
    Added,
    Removed,
}

/// Notification of one successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChange {
    pub category: Category,
    pub kind: ChangeKind,
    pub rom: String,
}

/// Catalog plus the materialized user lists
struct LoadedState {
    catalog: Catalog,
    favorites: Vec<Arc<Item>>,
    recent: Vec<Arc<Item>>,
    /// User lists whose stored contents could not be read
    unreadable: HashSet<Category>,
}

impl LoadedState {
    fn list(&self, category: Category) -> Option<&Vec<Arc<Item>>> {
        match category {
            Category::Favorites => Some(&self.favorites),
            Category::Recent => Some(&self.recent),
            Category::AllGames | Category::Music => None,
        }
    }

    fn list_mut(&mut self, category: Category) -> Option<&mut Vec<Arc<Item>>> {
        match category {
            Category::Favorites => Some(&mut self.favorites),
            Category::Recent => Some(&mut self.recent),
            Category::AllGames | Category::Music => None,
        }
    }
}

/// Owner of the catalog and all four categories
///
/// Not internally synchronized; drive it from one thread.
pub struct Library {
    source: Box<dyn AssetSource>,
    store: Box<dyn PreferenceStore>,
    recent_limit: usize,
    image_extension: String,
    state: Option<LoadedState>,
    subscribers: Vec<Sender<CategoryChange>>,
}

impl Library {
    /// Default cap on the recent list
    pub const DEFAULT_RECENT_LIMIT: usize = 20;

    /// Create a library over an asset bundle and a preference store
    ///
    /// Nothing is read until [`Library::load`] runs.
    pub fn new(source: impl AssetSource + 'static, store: impl PreferenceStore + 'static) -> Self {
        let defaults = LibrarySettings::default();
        Self {
            source: Box::new(source),
            store: Box::new(store),
            recent_limit: Self::DEFAULT_RECENT_LIMIT,
            image_extension: defaults.image_extension,
            state: None,
            subscribers: Vec::new(),
        }
    }

    /// Apply configured limits
    pub fn with_settings(mut self, settings: &LibrarySettings) -> Self {
        self.recent_limit = settings.recent_limit.max(1);
        self.image_extension = settings.image_extension.clone();
        self
    }

    /// Override the recent list cap
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit.max(1);
        self
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Build the catalog and materialize the user lists
    ///
    /// Runs once; later calls are no-ops. A list the store cannot read shows
    /// as empty and is read again before the first write to it.
    pub fn load(&mut self) {
        if self.state.is_some() {
            tracing::debug!("Library already loaded");
            return;
        }

        let catalog = Catalog::load(self.source.as_ref(), &self.image_extension);
        let mut unreadable = HashSet::new();
        let mut materialize = |category: Category| match self.materialize(&catalog, category) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Could not read {} list: {}", category, e);
                unreadable.insert(category);
                Vec::new()
            }
        };
        let favorites = materialize(Category::Favorites);
        let recent = materialize(Category::Recent);

        tracing::info!(
            "Library ready: {} favorites, {} recent",
            favorites.len(),
            recent.len()
        );

        self.state = Some(LoadedState {
            catalog,
            favorites,
            recent,
            unreadable,
        });
    }

    /// Stored list resolved against the catalog, Recent clamped to its cap
    fn materialize(
        &self,
        catalog: &Catalog,
        category: Category,
    ) -> Result<Vec<Arc<Item>>, LibraryError> {
        let Some(key) = category.store_key() else {
            return Ok(Vec::new());
        };

        let roms = self.store.load_list(key)?;
        let mut items = catalog.resolve(roms.iter().map(String::as_str));
        if category == Category::Recent {
            items.truncate(self.recent_limit);
        }
        Ok(items)
    }

    /// Re-read a list that failed to load
    ///
    /// Writes replace the whole stored list, so one must never be built on
    /// top of contents that were not read. Fails while the store stays
    /// unreadable.
    fn ensure_readable(&mut self, category: Category) -> Result<(), LibraryError> {
        self.load();
        let Some(state) = self.state.as_ref() else {
            return Ok(());
        };
        if !state.unreadable.contains(&category) {
            return Ok(());
        }

        let items = self.materialize(&state.catalog, category)?;
        tracing::info!("Recovered {} list with {} entries", category, items.len());

        let state = self.state_mut();
        state.unreadable.remove(&category);
        if let Some(list) = state.list_mut(category) {
            *list = items;
        }
        Ok(())
    }

    fn state_mut(&mut self) -> &mut LoadedState {
        self.load();
        self.state.get_or_insert_with(|| LoadedState {
            catalog: Catalog::default(),
            favorites: Vec::new(),
            recent: Vec::new(),
            unreadable: HashSet::new(),
        })
    }

    /// The loaded catalog
    pub fn catalog(&mut self) -> &Catalog {
        &self.state_mut().catalog
    }

    /// Contents of one category
    pub fn items(&mut self, category: Category) -> Vec<Arc<Item>> {
        let state = self.state_mut();
        match category {
            Category::AllGames => state.catalog.playable(),
            Category::Music => state.catalog.audio(),
            Category::Favorites => state.favorites.clone(),
            Category::Recent => state.recent.clone(),
        }
    }

    /// All four categories
    pub fn category_map(&mut self) -> BTreeMap<Category, Vec<Arc<Item>>> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.items(category)))
            .collect()
    }

    /// Only the user-ordered categories, for a cheap refresh
    pub fn volatile_category_map(&mut self) -> BTreeMap<Category, Vec<Arc<Item>>> {
        Category::VOLATILE
            .into_iter()
            .map(|category| (category, self.items(category)))
            .collect()
    }

    /// Receive a [`CategoryChange`] for every later successful mutation
    pub fn subscribe(&mut self) -> Receiver<CategoryChange> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, change: &CategoryChange) {
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    /// Resolve an item to its shared catalog entry when there is one
    fn shared(&mut self, item: &Item) -> Arc<Item> {
        self.state_mut()
            .catalog
            .get(item.rom())
            .cloned()
            .unwrap_or_else(|| Arc::new(item.clone()))
    }

    /// Add an item to a user-ordered category
    ///
    /// Favorites append once. Recent moves the item to the front and drops
    /// the oldest entry past the cap. Derived categories are left alone and
    /// return `None`, as does a favorite that is already present.
    pub fn add_to_category(
        &mut self,
        item: &Item,
        category: Category,
    ) -> Result<Option<CategoryChange>, LibraryError> {
        let Some(key) = category.store_key() else {
            tracing::debug!("Ignoring add to derived category {}", category);
            return Ok(None);
        };
        self.ensure_readable(category)?;

        let shared = self.shared(item);
        let limit = self.recent_limit;
        let state = self.state_mut();
        let Some(current) = state.list(category) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        match category {
            Category::Favorites => {
                if updated.iter().any(|i| i.rom() == item.rom()) {
                    return Ok(None);
                }
                updated.push(shared);
            }
            _ => {
                updated.retain(|i| i.rom() != item.rom());
                updated.insert(0, shared);
                updated.truncate(limit);
            }
        }

        self.commit(category, key, updated)?;
        let change = CategoryChange {
            category,
            kind: ChangeKind::Added,
            rom: item.rom().to_string(),
        };
        self.notify(&change);
        Ok(Some(change))
    }

    /// Remove an item from a user-ordered category
    ///
    /// Returns `None` for derived categories and items that were not present.
    pub fn remove_from_category(
        &mut self,
        item: &Item,
        category: Category,
    ) -> Result<Option<CategoryChange>, LibraryError> {
        let Some(key) = category.store_key() else {
            tracing::debug!("Ignoring remove from derived category {}", category);
            return Ok(None);
        };
        self.ensure_readable(category)?;

        let Some(current) = self.state_mut().list(category) else {
            return Ok(None);
        };
        if !current.iter().any(|i| i.rom() == item.rom()) {
            return Ok(None);
        }

        let updated: Vec<_> = current
            .iter()
            .filter(|i| i.rom() != item.rom())
            .cloned()
            .collect();

        self.commit(category, key, updated)?;
        let change = CategoryChange {
            category,
            kind: ChangeKind::Removed,
            rom: item.rom().to_string(),
        };
        self.notify(&change);
        Ok(Some(change))
    }

    /// Exact membership test; always false for derived categories
    pub fn is_in_category(&mut self, item: &Item, category: Category) -> bool {
        self.state_mut()
            .list(category)
            .is_some_and(|list| list.iter().any(|i| i.rom() == item.rom()))
    }

    /// Persist first, then swap the in-memory list
    fn commit(
        &mut self,
        category: Category,
        key: &str,
        updated: Vec<Arc<Item>>,
    ) -> Result<(), LibraryError> {
        let roms: Vec<String> = updated.iter().map(|i| i.rom().to_string()).collect();
        self.store.save_list(key, &roms)?;

        if let Some(list) = self.state_mut().list_mut(category) {
            *list = updated;
        }
        tracing::debug!("{} now holds {} entries", category, roms.len());
        Ok(())
    }
}
