use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session::{Settings, MAX_ADVANCE_DELAY};

/// Startup defaults. Toggles changed while running are not written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub auto_advance: bool,
    pub sound_enabled: bool,
    pub advance_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            auto_advance: settings.auto_advance,
            sound_enabled: settings.sound_enabled,
            advance_delay_secs: settings.advance_delay.as_secs(),
        }
    }
}

impl From<&Config> for Settings {
    fn from(cfg: &Config) -> Self {
        Self {
            auto_advance: cfg.auto_advance,
            sound_enabled: cfg.sound_enabled,
            advance_delay: Duration::from_secs(cfg.advance_delay_secs).min(MAX_ADVANCE_DELAY),
        }
    }
}

impl From<&Settings> for Config {
    fn from(settings: &Settings) -> Self {
        Self {
            auto_advance: settings.auto_advance,
            sound_enabled: settings.sound_enabled,
            advance_delay_secs: settings.advance_delay.as_secs(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typesprint") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typesprint_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Config>(&bytes).ok())
            .unwrap_or_default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
