//! Catalog item model

use crate::metadata::GameMetadata;
use std::hash::{Hash, Hasher};

pub const UNKNOWN_YEAR: &str = "Unknown year";
pub const UNKNOWN_DEVELOPER: &str = "Unknown developer";
pub const UNKNOWN_PUBLISHER: &str = "Unknown publisher";

/// What kind of file an item is, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// A cartridge image the emulator can run (`.nes`)
    Playable,
    /// A sound file for the music player (`.nsf`, `.nsfe`)
    Audio,
}

impl Classification {
    /// Classify a path by extension, ignoring case
    pub fn from_path(path: &str) -> Option<Self> {
        let file = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file.rsplit_once('.')?;

        match ext.to_lowercase().as_str() {
            "nes" => Some(Classification::Playable),
            "nsf" | "nsfe" => Some(Classification::Audio),
            _ => None,
        }
    }
}

/// One playable or audio file in the catalog
///
/// Identity is the ROM path alone.
#[derive(Debug, Clone)]
pub struct Item {
    rom: String,
    name: String,
    image: Option<String>,
    classification: Option<Classification>,
    year: Option<u32>,
    developer: Option<String>,
    publisher: Option<String>,
}

impl Item {
    /// Create an item from a relative ROM path
    pub fn new(rom: impl Into<String>) -> Self {
        let rom = normalize_rom_path(&rom.into());
        let name = display_name(&rom);
        let classification = Classification::from_path(&rom);

        Self {
            rom,
            name,
            image: None,
            classification,
            year: None,
            developer: None,
            publisher: None,
        }
    }

    /// Attach a cover image reference
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Overwrite the descriptive fields from a metadata record
    pub fn enrich(&mut self, metadata: &GameMetadata) {
        self.year = metadata.year;
        self.developer = metadata.developer.clone();
        self.publisher = metadata.publisher.clone();
    }

    pub fn rom(&self) -> &str {
        &self.rom
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn classification(&self) -> Option<Classification> {
        self.classification
    }

    pub fn is_playable(&self) -> bool {
        self.classification == Some(Classification::Playable)
    }

    pub fn is_audio(&self) -> bool {
        self.classification == Some(Classification::Audio)
    }

    pub fn year(&self) -> Option<u32> {
        self.year
    }

    pub fn developer(&self) -> Option<&str> {
        self.developer.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn year_label(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
    }

    pub fn developer_label(&self) -> &str {
        self.developer().unwrap_or(UNKNOWN_DEVELOPER)
    }

    pub fn publisher_label(&self) -> &str {
        self.publisher().unwrap_or(UNKNOWN_PUBLISHER)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.rom == other.rom
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rom.hash(state);
    }
}

/// Basename of a path with its last extension removed
///
/// Names starting with a dot are kept whole, so `.hidden` and `.foo.nes`
/// are returned unchanged.
pub fn display_name(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    match (file.find('.'), file.rfind('.')) {
        (Some(first), Some(last)) if first > 0 => file[..last].to_string(),
        _ => file.to_string(),
    }
}

fn normalize_rom_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_by_extension() {
        assert_eq!(
            Classification::from_path("roms/Contra.nes"),
            Some(Classification::Playable)
        );
        assert_eq!(
            Classification::from_path("roms/CONTRA.NES"),
            Some(Classification::Playable)
        );
        assert_eq!(
            Classification::from_path("roms/Theme.nsf"),
            Some(Classification::Audio)
        );
        assert_eq!(
            Classification::from_path("roms/Theme.NsFe"),
            Some(Classification::Audio)
        );
        assert_eq!(Classification::from_path("roms/readme.txt"), None);
        assert_eq!(Classification::from_path("roms/nes"), None);
        assert_eq!(Classification::from_path("roms.nes/readme"), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("roms/Super Mario Bros.nes"), "Super Mario Bros");
        assert_eq!(display_name("roms/Dr. Mario.nes"), "Dr. Mario");
        assert_eq!(display_name("roms/noext"), "noext");
        assert_eq!(display_name(".hidden"), ".hidden");
        assert_eq!(display_name("roms/.foo.nes"), ".foo.nes");
    }

    #[test]
    fn test_item_identity_is_rom_path() {
        let a = Item::new("roms/Contra.nes").with_image("images/Contra.jpg");
        let b = Item::new("roms/Contra.nes");
        let c = Item::new("roms/Contra2.nes");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rom_path_normalized() {
        let item = Item::new("./roms\\Contra.nes");
        assert_eq!(item.rom(), "roms/Contra.nes");
        assert_eq!(item.name(), "Contra");
    }

    #[test]
    fn test_sentinels_without_enrichment() {
        let item = Item::new("roms/Contra.nes");
        assert_eq!(item.year_label(), UNKNOWN_YEAR);
        assert_eq!(item.developer_label(), UNKNOWN_DEVELOPER);
        assert_eq!(item.publisher_label(), UNKNOWN_PUBLISHER);
    }

    #[test]
    fn test_enrich() {
        let mut item = Item::new("roms/Contra.nes");
        item.enrich(&GameMetadata {
            name: "Contra".into(),
            year: Some(1987),
            developer: Some("Konami".into()),
            publisher: None,
        });
        assert_eq!(item.year(), Some(1987));
        assert_eq!(item.developer_label(), "Konami");
        assert_eq!(item.publisher_label(), UNKNOWN_PUBLISHER);
        assert!(item.is_playable());
    }
}
