//! User config file load/save (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Lutfiy settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LutfiyConfig {
    /// N-gram model file used for ZWNJ correction
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    /// Scoring window; unset means twice the model order
    #[serde(default)]
    pub window_size: Option<usize>,
    /// Run ZWNJ correction in `process`
    #[serde(default = "default_fix_zwnj")]
    pub fix_zwnj: bool,
    /// Run transliteration in `process`
    #[serde(default)]
    pub transliterate: bool,
}

fn default_fix_zwnj() -> bool {
    true
}

impl Default for LutfiyConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            window_size: None,
            fix_zwnj: default_fix_zwnj(),
            transliterate: false,
        }
    }
}

/// Config file path: $XDG_CONFIG_HOME/lutfiy/config.json,
/// else ~/.config/lutfiy/config.json
pub fn config_path() -> PathBuf {
    let usable = |var: &str| {
        std::env::var(var)
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.is_absolute() && p.is_dir())
    };

    let base = usable("XDG_CONFIG_HOME")
        .or_else(|| usable("HOME").map(|home| home.join(".config")))
        // no usable HOME
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    base.join("lutfiy").join("config.json")
}

/// Load the config (defaults when the file is missing or unparsable)
pub fn load_config() -> LutfiyConfig {
    load_config_from(&config_path())
}

/// Load the config from an explicit path
pub fn load_config_from(path: &Path) -> LutfiyConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring malformed config {}: {}", path.display(), e);
            LutfiyConfig::default()
        }),
        Err(_) => LutfiyConfig::default(),
    }
}

/// Save the config
pub fn save_config(config: &LutfiyConfig) -> Result<(), String> {
    save_config_to(config, &config_path())
}

/// Save the config to an explicit path
pub fn save_config_to(config: &LutfiyConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create config directory: {}", e))?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| format!("failed to serialize config: {}", e))?;
    fs::write(path, json).map_err(|e| format!("failed to write config file: {}", e))?;
    Ok(())
}
