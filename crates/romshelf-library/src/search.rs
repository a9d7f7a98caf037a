//! Name search over the derived categories

use crate::item::Item;
use crate::library::Library;
use crate::Category;
use std::sync::Arc;

/// Items whose ROM path contains `query`, ignoring case, in list order
pub fn filter_by_rom(items: &[Arc<Item>], query: &str) -> Vec<Arc<Item>> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.rom().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

impl Library {
    /// Search a derived category by ROM path substring
    ///
    /// An empty query matches nothing, and user-ordered categories are not
    /// searchable.
    pub fn search(&mut self, query: &str, category: Category) -> Vec<Arc<Item>> {
        if !category.is_searchable() {
            tracing::debug!("Unsupported search category: {}", category);
            return Vec::new();
        }
        if query.is_empty() {
            return Vec::new();
        }

        filter_by_rom(&self.items(category), query)
    }

    /// [`Library::search`] with the category given by name
    ///
    /// Unknown names give an empty result.
    pub fn search_by_name(&mut self, query: &str, category: &str) -> Vec<Arc<Item>> {
        match Category::parse(category) {
            Some(category) => self.search(query, category),
            None => {
                tracing::debug!("Unknown search category: {:?}", category);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::StaticAssets;
    use crate::preferences::MemoryPreferenceStore;

    fn library() -> Library {
        let assets = StaticAssets::new().with_roms([
            "Super Mario Bros.nes",
            "Contra.nes",
            "Mario Theme.nsf",
            "Dr. MARIO.nes",
        ]);
        Library::new(assets, MemoryPreferenceStore::new())
    }

    #[test]
    fn test_search_games() {
        let mut library = library();
        let results = library.search_by_name("mario", "All Games");

        let roms: Vec<_> = results.iter().map(|i| i.rom()).collect();
        assert_eq!(roms, vec!["roms/Super Mario Bros.nes", "roms/Dr. MARIO.nes"]);
    }

    #[test]
    fn test_search_music() {
        let mut library = library();
        let results = library.search("THEME", Category::Music);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "Mario Theme");
    }

    #[test]
    fn test_search_matches_path_not_name() {
        let mut library = library();
        assert_eq!(library.search("roms/", Category::AllGames).len(), 3);
        assert_eq!(library.search(".nes", Category::AllGames).len(), 3);
    }

    #[test]
    fn test_empty_query_and_bad_category() {
        let mut library = library();
        assert!(library.search_by_name("", "All Games").is_empty());
        assert!(library.search_by_name("x", "Unknown").is_empty());
        assert!(library.search_by_name("mario", "").is_empty());
        assert!(library.search("mario", Category::Favorites).is_empty());
    }
}
