use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::meter::MeterTuning;
use crate::scores::DEFAULT_SCORES_FILE;

pub const SETTINGS_PATH_ENV: &str = "PRESENCE_SETTINGS_PATH";
pub const SCORES_PATH_ENV: &str = "PRESENCE_SCORES_PATH";

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 240;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            resizable: true,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingSettings {
    pub fps: u32,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self { fps: 30 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub gameplay: MeterTuning,
    #[serde(default)]
    pub scores: ScoreSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            window: WindowSettings::default(),
            timing: TimingSettings::default(),
            gameplay: MeterTuning::default(),
            scores: ScoreSettings::default(),
        }
    }
}

impl GameSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.window.width = self.window.width.max(1);
        self.window.height = self.window.height.max(1);
        self.timing.fps = self.timing.fps.clamp(MIN_FPS, MAX_FPS);
        self.gameplay = self.gameplay.sanitized();
        self
    }
}

fn default_version() -> u32 {
    1
}

/// First of: command line, `PRESENCE_SCORES_PATH`, the settings file, `high_scores.txt`.
pub fn resolve_scores_path(
    cli: Option<PathBuf>,
    env: Option<PathBuf>,
    settings: &GameSettings,
) -> PathBuf {
    cli.or(env)
        .or_else(|| settings.scores.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_FILE))
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(SETTINGS_PATH_ENV) {
            return Self::at(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::at(base.join("presence-gauge").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing file is the normal first run, and anything unreadable falls back
    /// to defaults with a warning.
    pub fn load(&self) -> GameSettings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return GameSettings::default(),
            Err(err) => {
                warn!("could not read settings {}: {err}", self.path.display());
                return GameSettings::default();
            }
        };
        match serde_json::from_slice::<GameSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!("ignoring malformed settings {}: {err}", self.path.display());
                GameSettings::default()
            }
        }
    }

    /// Like `load`, but a first run also writes the defaults out so there is a file to edit.
    pub fn load_or_create(&self) -> GameSettings {
        if self.path.exists() {
            return self.load();
        }
        let settings = GameSettings::default();
        match self.save(&settings) {
            Ok(()) => info!("wrote default settings to {}", self.path.display()),
            Err(err) => warn!("could not write settings {}: {err}", self.path.display()),
        }
        settings
    }

    pub fn save(&self, settings: &GameSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
