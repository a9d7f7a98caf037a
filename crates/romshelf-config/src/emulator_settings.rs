//! Native emulator launch settings

use serde::{Deserialize, Serialize};

/// How the native emulator executable is invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorSettings {
    /// Executable name (looked up on PATH) or absolute path
    pub binary: String,

    /// ROM appended as the last argument when the cheat cartridge is requested
    pub aux_rom: String,

    /// Requested window width in pixels
    pub width: u32,

    /// Requested window height in pixels
    pub height: u32,
}

impl Default for EmulatorSettings {
    fn default() -> Self {
        Self {
            binary: "nes".to_string(),
            aux_rom: "roms/GENIE.nes".to_string(),
            width: 768,
            height: 720,
        }
    }
}
