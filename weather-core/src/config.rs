use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::provider::openweather::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: &[&str] = &["API_KEY", "OPENWEATHER_API_KEY"];

/// Icons shipped with the workspace, found relative to this crate at build time.
const BUNDLED_ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../assets");

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// assets_dir = "/usr/share/weather/assets"
/// endpoint = "https://api.openweathermap.org/data/2.5/weather"
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub assets_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,

    /// Key picked up from the environment; never written back to disk.
    #[serde(skip)]
    env_api_key: Option<String>,
}

impl Config {
    /// Load config from disk (or defaults on first run) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env();
        Ok(cfg)
    }

    /// Read a config file, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = project_dirs()
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Process environment first, then a `.env` file in the working directory or a parent.
    pub fn apply_env(&mut self) {
        let dotenv = dotenvy::dotenv_iter().map(collect_pairs).unwrap_or_default();
        self.apply_env_from(|name| std::env::var(name).ok().or_else(|| dotenv.get(name).cloned()));
    }

    /// Like [`Config::apply_env`], with an explicit `.env` file and process lookup.
    pub fn apply_env_file(
        &mut self,
        path: &Path,
        process: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        let iter = dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to read env file: {}", path.display()))?;
        let dotenv = collect_pairs(iter);

        self.apply_env_from(|name| process(name).or_else(|| dotenv.get(name).cloned()));
        Ok(())
    }

    /// Pick up the first non-blank key from [`API_KEY_VARS`] using `lookup`.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.env_api_key = API_KEY_VARS
            .iter()
            .copied()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Environment first, then the file.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.env_api_key
            .clone()
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
    }

    pub fn endpoint(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir.clone().unwrap_or_else(default_assets_dir)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "weather-lookup", "weather-cli")
}

fn collect_pairs<R: std::io::Read>(iter: dotenvy::Iter<R>) -> HashMap<String, String> {
    iter.filter_map(|pair| pair.ok()).collect()
}

/// Where icons are looked for when no `assets_dir` is configured, in order:
/// the platform data dir, `assets/` next to the executable, the bundled copy.
pub fn assets_dir_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(dirs) = project_dirs() {
        candidates.push(dirs.data_dir().join("assets"));
    }
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    if let Some(exe_dir) = exe_dir {
        candidates.push(exe_dir.join("assets"));
    }
    candidates.push(PathBuf::from(BUNDLED_ASSETS_DIR));

    candidates
}

/// First candidate that is an existing directory; otherwise the first candidate.
pub fn pick_assets_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|dir| dir.is_dir())
        .or_else(|| candidates.first())
        .cloned()
}

pub fn default_assets_dir() -> PathBuf {
    pick_assets_dir(&assets_dir_candidates()).unwrap_or_else(|| PathBuf::from(BUNDLED_ASSETS_DIR))
}
