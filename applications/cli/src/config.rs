/// CLI configuration
use crate::error::{CliError, Result};
use encore_geofence::{default_points_of_interest, PointOfInterest};
use encore_playlist::{HistoryConfig, DEFAULT_STORAGE_KEY};
use encore_preferences::THEME_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File read when `--config` is not given; may be absent
pub const DEFAULT_CONFIG_FILE: &str = "encore.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncoreConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playlist")]
    pub playlist: PlaylistSettings,

    #[serde(default = "default_theme")]
    pub theme: ThemeSettings,

    #[serde(default = "default_geofence")]
    pub geofence: GeofenceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// JSON file used by the `file` backend
    #[serde(default = "default_path")]
    pub path: PathBuf,

    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistSettings {
    #[serde(default = "default_playlist_key")]
    pub key: String,

    #[serde(default)]
    pub max_history: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeSettings {
    #[serde(default = "default_theme_key")]
    pub key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeofenceSettings {
    #[serde(default = "default_points_of_interest")]
    pub points: Vec<PointOfInterest>,
}

impl EncoreConfig {
    /// Load configuration from a TOML file and `ENCORE_` environment variables
    ///
    /// An explicit `path` must exist. Without one, `encore.toml` in the working
    /// directory is used if present. Nested keys use a double underscore in the
    /// environment, e.g. `ENCORE_STORAGE__BACKEND=sqlite`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ENCORE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.playlist.key.trim().is_empty() {
            return Err(CliError::Config("playlist.key must not be empty".to_string()));
        }

        if self.theme.key.trim().is_empty() {
            return Err(CliError::Config("theme.key must not be empty".to_string()));
        }

        if self.playlist.key == self.theme.key {
            return Err(CliError::Config(format!(
                "playlist.key and theme.key are both '{}'",
                self.playlist.key
            )));
        }

        if self.playlist.max_history == Some(0) {
            return Err(CliError::Config(
                "playlist.max_history must be at least 1 (omit it for unbounded)".to_string(),
            ));
        }

        if let Some(point) = self
            .geofence
            .points
            .iter()
            .find(|p| !p.radius_m.is_finite() || p.radius_m < 0.0)
        {
            return Err(CliError::Config(format!(
                "geofence point '{}' has invalid radius {}",
                point.id, point.radius_m
            )));
        }

        Ok(())
    }

    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig {
            storage_key: self.playlist.key.clone(),
            max_history: self.playlist.max_history,
        }
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        backend: default_backend(),
        path: default_path(),
        database_url: default_database_url(),
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_path() -> PathBuf {
    PathBuf::from("encore-state.json")
}

fn default_database_url() -> String {
    "sqlite://encore.db".to_string()
}

fn default_playlist() -> PlaylistSettings {
    PlaylistSettings {
        key: default_playlist_key(),
        max_history: None,
    }
}

fn default_playlist_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_theme() -> ThemeSettings {
    ThemeSettings {
        key: default_theme_key(),
    }
}

fn default_theme_key() -> String {
    THEME_STORAGE_KEY.to_string()
}

fn default_geofence() -> GeofenceSettings {
    GeofenceSettings {
        points: default_points_of_interest(),
    }
}

impl Default for EncoreConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            playlist: default_playlist(),
            theme: default_theme(),
            geofence: default_geofence(),
        }
    }
}
