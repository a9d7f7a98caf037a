//! Main emulator launcher

use crate::{EmulatorError, TargetMode};
use romshelf_config::EmulatorSettings;
use romshelf_library::{Category, Item, Library};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Arguments for one emulator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// ROM path relative to the asset root
    pub rom_path: String,

    /// Requested window width
    pub width: u32,

    /// Requested window height
    pub height: u32,

    pub target_mode: TargetMode,

    /// Extra ROM loaded alongside the game (cheat cartridge)
    pub aux_rom: Option<String>,
}

impl LaunchRequest {
    /// Create a request for a ROM path with default geometry
    pub fn for_rom(rom_path: impl Into<String>) -> Self {
        let defaults = EmulatorSettings::default();
        Self {
            rom_path: rom_path.into(),
            width: defaults.width,
            height: defaults.height,
            target_mode: TargetMode::default(),
            aux_rom: None,
        }
    }

    /// Set the window geometry
    pub fn with_geometry(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_target_mode(mut self, mode: TargetMode) -> Self {
        self.target_mode = mode;
        self
    }

    /// Load an auxiliary ROM after the game
    pub fn with_aux_rom(mut self, aux_rom: impl Into<String>) -> Self {
        self.aux_rom = Some(aux_rom.into());
        self
    }

    /// Emulator argv after the program name
    ///
    /// `<rom> <width> <height> <mode> [aux-rom]`
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.rom_path.clone(),
            self.width.to_string(),
            self.height.to_string(),
            self.target_mode.flag().to_string(),
        ];
        if let Some(aux) = &self.aux_rom {
            args.push(aux.clone());
        }
        args
    }
}

/// Launch result
#[derive(Debug)]
pub struct LaunchResult {
    /// Child process handle
    pub child: Child,

    /// PID of the launched process
    pub pid: u32,
}

/// Spawns the native emulator
#[derive(Debug, Clone)]
pub struct EmulatorLauncher {
    /// Resolved emulator executable
    binary: PathBuf,

    /// Directory ROM paths are relative to
    working_dir: Option<PathBuf>,

    settings: EmulatorSettings,
}

impl EmulatorLauncher {
    /// Create a launcher from settings, resolving the binary on PATH
    pub fn from_settings(settings: &EmulatorSettings) -> Result<Self, EmulatorError> {
        let binary = which::which(&settings.binary)
            .map_err(|_| EmulatorError::BinaryNotFound(settings.binary.clone()))?;

        tracing::debug!("Using emulator at {}", binary.display());
        Ok(Self::with_binary(binary, settings))
    }

    /// Create a launcher for a known executable
    pub fn with_binary(binary: impl Into<PathBuf>, settings: &EmulatorSettings) -> Self {
        Self {
            binary: binary.into(),
            working_dir: None,
            settings: settings.clone(),
        }
    }

    /// Resolve ROM paths against the asset root
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Build a request for an item using the configured geometry
    pub fn request_for(&self, item: &Item, with_aux: bool, mode: TargetMode) -> LaunchRequest {
        let mut request = LaunchRequest::for_rom(item.rom())
            .with_geometry(self.settings.width, self.settings.height)
            .with_target_mode(mode);
        if with_aux {
            request = request.with_aux_rom(self.settings.aux_rom.clone());
        }
        request
    }

    /// Build the command without running it
    pub fn command(&self, request: &LaunchRequest) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(request.args());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }

    /// Spawn the emulator
    pub fn spawn(&self, request: &LaunchRequest) -> Result<LaunchResult, EmulatorError> {
        let rom = match &self.working_dir {
            Some(dir) => dir.join(&request.rom_path),
            None => PathBuf::from(&request.rom_path),
        };
        if !rom.exists() {
            return Err(EmulatorError::RomNotFound(rom));
        }

        tracing::info!(
            "Launching {} ({}x{}, mode {})",
            request.rom_path,
            request.width,
            request.height,
            request.target_mode.flag()
        );

        let child = self
            .command(request)
            .spawn()
            .map_err(|e| EmulatorError::LaunchFailed(format!("Failed to spawn process: {}", e)))?;

        let pid = child.id();
        Ok(LaunchResult { child, pid })
    }

    /// Record an item as recently played, then start it
    ///
    /// A failure to update the recent list is logged and does not block the
    /// launch.
    pub fn launch_rom(
        &self,
        library: &mut Library,
        item: &Item,
        with_aux: bool,
        mode: TargetMode,
    ) -> Result<LaunchResult, EmulatorError> {
        if let Err(e) = library.add_to_category(item, Category::Recent) {
            tracing::warn!("Could not record {} as recent: {}", item.rom(), e);
        }

        let request = self.request_for(item, with_aux, mode);
        self.spawn(&request)
    }
}
