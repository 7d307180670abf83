//! Plugin configuration and its persisted store.
//!
//! Configuration is an explicitly owned object handed to services at
//! construction - not ambient global state. It is loaded once when the store
//! is opened and mutated only through [`ConfigStore::update`], which
//! persists immediately; the next [`ConfigStore::snapshot`] always observes
//! the latest write, so the capture gate can never act on a stale key.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// All configurable plugin settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Verbose trace messages in the host chat (all animation ids, gate
    /// rejections, submission failures)
    #[serde(default)]
    pub debug: bool,

    /// The currently gating event key; empty means the gate is unset
    #[serde(default)]
    pub event_key: String,

    /// Play the victory sound on a correct submission
    #[serde(default = "default_true")]
    pub show_celebration_sound: bool,

    /// Render the fireworks graphic on a correct submission
    #[serde(default = "default_true")]
    pub show_celebration_fireworks: bool,

    /// Show the answer-authoring panel instead of the capture panel
    #[serde(default)]
    pub answer_builder_mode: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            debug: false,
            event_key: String::new(),
            show_celebration_sound: true,
            show_celebration_fireworks: true,
            answer_builder_mode: false,
        }
    }
}

/// Persisted configuration store with an in-memory cache.
///
/// Stores the config as JSON at:
/// - Linux: `~/.config/keyhunt/client/config.json`
/// - macOS: `~/Library/Application Support/io.keyhunt.client/config.json`
/// - Windows: `C:\Users\<User>\AppData\Roaming\keyhunt\client\config.json`
///
/// Cloning is cheap and clones share the same cache and file.
#[derive(Clone)]
pub struct ConfigStore {
    path: PathBuf,
    cache: Arc<RwLock<PluginConfig>>,
}

impl ConfigStore {
    /// Open the store at the platform config location.
    pub fn open_default() -> Self {
        let path = if let Some(dirs) = ProjectDirs::from("io", "keyhunt", "client") {
            dirs.config_dir().join("config.json")
        } else {
            // Fallback to current directory if project dirs unavailable
            PathBuf::from("keyhunt_config.json")
        };
        Self::open(path)
    }

    /// Open the store at an explicit path, loading existing data if present.
    ///
    /// A missing or unreadable file yields defaults; a malformed file is
    /// logged and replaced on the next write, never a startup failure.
    pub fn open(path: PathBuf) -> Self {
        let config = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(data) => match serde_json::from_str::<PluginConfig>(&data) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config file: {}", e);
                        PluginConfig::default()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config file: {}", e);
                    PluginConfig::default()
                }
            }
        } else {
            PluginConfig::default()
        };

        tracing::debug!("Config store initialized at: {:?}", path);

        Self {
            path,
            cache: Arc::new(RwLock::new(config)),
        }
    }

    /// Current configuration.
    pub fn snapshot(&self) -> PluginConfig {
        match self.cache.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for config: {}", e);
                PluginConfig::default()
            }
        }
    }

    /// Apply a mutation and persist it. The single entry point for all
    /// config writes; returns the updated snapshot.
    pub fn update(&self, mutate: impl FnOnce(&mut PluginConfig)) -> PluginConfig {
        let updated = match self.cache.write() {
            Ok(mut guard) => {
                mutate(&mut guard);
                guard.clone()
            }
            Err(e) => {
                tracing::error!("Failed to acquire write lock for config: {}", e);
                return PluginConfig::default();
            }
        };
        self.persist(&updated);
        updated
    }

    fn persist(&self, config: &PluginConfig) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(config) {
            Ok(data) => {
                if let Err(e) = fs::write(&self.path, data) {
                    tracing::error!("Failed to write config file: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize config: {}", e);
            }
        }
    }
}
