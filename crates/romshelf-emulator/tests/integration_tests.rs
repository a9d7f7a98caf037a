//! Integration tests for launching and recent-list bookkeeping

use romshelf_config::EmulatorSettings;
use romshelf_emulator::{EmulatorError, EmulatorLauncher, TargetMode};
use romshelf_library::{Category, DirectoryAssets, Item, Library, MemoryPreferenceStore};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an asset bundle on disk
struct EmulatorTestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    assets_dir: PathBuf,
}

impl EmulatorTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let assets_dir = temp_dir.path().join("assets");
        fs::create_dir_all(assets_dir.join("roms")).unwrap();

        Self {
            temp_dir,
            assets_dir,
        }
    }

    fn create_rom(&self, name: &str) -> Item {
        fs::write(self.assets_dir.join("roms").join(name), b"FAKE_ROM_DATA").unwrap();
        Item::new(format!("roms/{}", name))
    }

    fn library(&self) -> Library {
        Library::new(
            DirectoryAssets::new(&self.assets_dir),
            MemoryPreferenceStore::new(),
        )
    }

    /// A launcher whose "emulator" is the system shell
    fn launcher(&self) -> EmulatorLauncher {
        EmulatorLauncher::with_binary("/bin/sh", &EmulatorSettings::default())
            .with_working_dir(&self.assets_dir)
    }
}

#[cfg(unix)]
#[test]
fn test_launch_records_recent_and_spawns() {
    let env = EmulatorTestEnv::new();
    let contra = env.create_rom("Contra.nes");
    let mario = env.create_rom("Mario.nes");
    let mut library = env.library();
    let launcher = env.launcher();

    for item in [&contra, &mario, &contra] {
        let mut result = launcher
            .launch_rom(&mut library, item, false, TargetMode::Handheld)
            .unwrap();
        assert!(result.pid > 0);
        result.child.wait().unwrap();
    }

    let recent = library.items(Category::Recent);
    let roms: Vec<_> = recent.iter().map(|i| i.rom()).collect();
    assert_eq!(roms, vec!["roms/Contra.nes", "roms/Mario.nes"]);
}

#[test]
fn test_launch_missing_rom_still_records_recent() {
    let env = EmulatorTestEnv::new();
    let mut library = env.library();
    let launcher = env.launcher();
    let ghost = Item::new("roms/Ghost.nes");

    let err = launcher
        .launch_rom(&mut library, &ghost, true, TargetMode::Television)
        .unwrap_err();

    assert!(matches!(err, EmulatorError::RomNotFound(_)));
    assert!(library.is_in_category(&ghost, Category::Recent));
}

#[test]
fn test_genie_request_from_settings() {
    let env = EmulatorTestEnv::new();
    let contra = env.create_rom("Contra.nes");
    let settings = EmulatorSettings {
        aux_rom: "roms/CHEATS.nes".into(),
        width: 1280,
        height: 720,
        ..Default::default()
    };
    let launcher = EmulatorLauncher::with_binary("/bin/sh", &settings);

    let request = launcher.request_for(&contra, true, TargetMode::Television);
    assert_eq!(
        request.args(),
        vec!["roms/Contra.nes", "1280", "720", "1", "roms/CHEATS.nes"]
    );
}
