use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            static_dir: PathBuf::from("web"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    static_dir: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the config file, then environment. Later sources win.
pub fn load_settings_from(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.bind_addr = v;
                }
                if let Some(v) = file_cfg.static_dir {
                    settings.static_dir = PathBuf::from(v);
                }
            }
            Err(error) => {
                warn!(path = %config_path.display(), %error, "ignoring malformed config file");
            }
        }
    }

    if let Some(v) = env("VISUM_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Some(v) = env("VISUM_DIR") {
        settings.static_dir = PathBuf::from(v);
    }
    if let Some(v) = env("APP__STATIC_DIR") {
        settings.static_dir = PathBuf::from(v);
    }

    settings
}

/// Accepts the `:8080` shorthand for "all interfaces".
pub fn normalize_bind_addr(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().bind_addr;
    }
    if raw.starts_with(':') {
        return format!("0.0.0.0{raw}");
    }
    raw.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
