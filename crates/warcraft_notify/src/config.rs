use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of this plugin's entry inside `plugin.json`.
pub const PACKAGE_NAME: &str = "opencode-warcraft-notifications";

const PLUGIN_FILE: &str = "plugin.json";
const KNOWN_KEYS: &[&str] = &["soundsDir", "faction"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("`{}` entry must be a JSON object", PACKAGE_NAME)]
    NotAnObject,
    #[error("unrecognized keys in `{}` configuration: {}", PACKAGE_NAME, .0.join(", "))]
    UnknownKeys(Vec<String>),
    #[error("invalid `{}` configuration: {}", PACKAGE_NAME, .0)]
    Invalid(#[source] serde_json::Error),
}

/// Which sound set to draw from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Alliance,
    Horde,
    #[default]
    Both,
}

impl Faction {
    pub fn as_str(self) -> &'static str {
        match self {
            Faction::Alliance => "alliance",
            Faction::Horde => "horde",
            Faction::Both => "both",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sounds_dir: Option<PathBuf>,
    #[serde(default)]
    pub faction: Faction,
}

impl PluginConfig {
    /// Extract this plugin's entry from a parsed `plugin.json` document.
    ///
    /// Returns `Ok(None)` when the document has no entry for [`PACKAGE_NAME`].
    pub fn from_document(document: &Value) -> Result<Option<Self>, ConfigError> {
        let Some(entry) = document.get(PACKAGE_NAME) else {
            return Ok(None);
        };
        let object = entry.as_object().ok_or(ConfigError::NotAnObject)?;

        let mut unknown: Vec<String> =
            object.keys().filter(|key| !KNOWN_KEYS.contains(&key.as_str())).cloned().collect();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(ConfigError::UnknownKeys(unknown));
        }

        serde_json::from_value(entry.clone()).map(Some).map_err(ConfigError::Invalid)
    }

    /// Read the entry from a specific `plugin.json`.
    pub fn from_path(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let document: Value = serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        Self::from_document(&document)
    }

    /// Load the first entry found in the project's, then the user's, `plugin.json`.
    ///
    /// Falls back to defaults when neither file carries an entry.
    pub fn load(project_dir: Option<&Path>, locations: &Locations) -> Result<Self, ConfigError> {
        for path in candidate_paths(project_dir, locations) {
            if !path.is_file() {
                continue;
            }
            if let Some(config) = Self::from_path(&path)? {
                debug!("loaded plugin configuration from {}", path.display());
                return Ok(config);
            }
        }

        debug!("no plugin configuration found, using defaults");
        Ok(Self::default())
    }

    /// Directory holding the faction sound folders.
    pub fn resolve_sounds_dir(&self, locations: &Locations) -> PathBuf {
        self.sounds_dir.clone().unwrap_or_else(|| locations.sounds_dir.clone())
    }
}

fn candidate_paths(project_dir: Option<&Path>, locations: &Locations) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(project_dir) = project_dir {
        paths.push(project_dir.join(".opencode").join(PLUGIN_FILE));
    }
    paths.push(locations.config_home.join("opencode").join(PLUGIN_FILE));
    paths
}

/// Directories and switches derived from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locations {
    pub config_home: PathBuf,
    pub data_home: PathBuf,
    /// Default sounds directory when the configuration names none.
    pub sounds_dir: PathBuf,
    /// Remote root that sound files are downloaded from.
    pub sounds_base_url: Option<String>,
    pub debug: bool,
}

impl Locations {
    pub fn from_process_env() -> Self {
        Self::from_env(|key| std::env::var(key).ok())
    }

    /// Resolve locations through `lookup`, which maps variable names to values.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config_home = var("XDG_CONFIG_HOME")
            .or_else(|| var("APPDATA"))
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .unwrap_or_else(|| PathBuf::from(".config"));
        let data_home = var("XDG_DATA_HOME")
            .or_else(|| var("APPDATA"))
            .map(PathBuf::from)
            .or_else(dirs::data_dir)
            .unwrap_or_else(|| PathBuf::from(".local").join("share"));

        let sounds_dir = var("SOUNDS_DATA_DIR").map(PathBuf::from).unwrap_or_else(|| {
            data_home.join("opencode").join("storage").join("plugin").join(PACKAGE_NAME).join("sounds")
        });

        let sounds_base_url =
            var("SOUNDS_BASE_URL").map(|url| url.trim_end_matches('/').to_owned());

        let debug = lookup("DEBUG_OPENCODE")
            .map(|value| !matches!(value.trim().to_ascii_lowercase().as_str(), "" | "0" | "false"))
            .unwrap_or(false);

        Self { config_home, data_home, sounds_dir, sounds_base_url, debug }
    }
}
