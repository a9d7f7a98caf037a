//! Native emulator launching for Romshelf
//!
//! Builds the emulator's argument list from a catalog item, records the
//! launch in the recent list and spawns the process.

mod launcher;

pub use launcher::{EmulatorLauncher, LaunchRequest, LaunchResult};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("Emulator binary not found: {0}")]
    BinaryNotFound(String),

    #[error("ROM not found: {0}")]
    RomNotFound(PathBuf),

    #[error("Launch failed: {0}")]
    LaunchFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Display the emulator renders for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMode {
    /// Phone or handheld with touch controls
    #[default]
    Handheld,
    /// Television with a gamepad
    Television,
}

impl TargetMode {
    /// Value passed on the emulator command line
    pub fn flag(&self) -> &'static str {
        match self {
            TargetMode::Handheld => "0",
            TargetMode::Television => "1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_mode_flag() {
        assert_eq!(TargetMode::Handheld.flag(), "0");
        assert_eq!(TargetMode::Television.flag(), "1");
        assert_eq!(TargetMode::default(), TargetMode::Handheld);
    }
}
