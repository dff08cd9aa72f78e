//! Theme settings
//!
//! Light and dark modes come with fixed background/text colors; custom mode
//! keeps whatever colors the user picked. The accent color is independent of
//! the mode.

use crate::error::{PreferencesError, Result};
use encore_core::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default key the theme is stored under
pub const THEME_STORAGE_KEY: &str = "themeState";

/// Default accent (the brand green)
pub const DEFAULT_ACCENT: &str = "#1DB954";

const DARK_BACKGROUND: &str = "#121212";
const DARK_TEXT: &str = "#ffffff";
const LIGHT_BACKGROUND: &str = "#ffffff";
const LIGHT_TEXT: &str = "#000000";

/// Theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    Custom,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = PreferencesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "custom" => Ok(Self::Custom),
            other => Err(PreferencesError::InvalidInput(format!(
                "unknown theme mode '{}'",
                other
            ))),
        }
    }
}

/// Current theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub custom_accent: String,
    pub custom_background: String,
    pub custom_text: String,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Dark,
            custom_accent: DEFAULT_ACCENT.to_string(),
            custom_background: DARK_BACKGROUND.to_string(),
            custom_text: DARK_TEXT.to_string(),
        }
    }
}

/// Theme changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeCommand {
    SetMode(ThemeMode),
    SetAccent(String),
    SetBackground(String),
    SetText(String),
    Reset,
}

impl ThemeState {
    /// Apply `command`, returning the new theme
    ///
    /// # Errors
    /// Returns `InvalidInput` if a color is not `#RRGGBB`; `self` is unchanged.
    pub fn apply(&self, command: ThemeCommand) -> Result<Self> {
        let mut next = self.clone();

        match command {
            ThemeCommand::SetMode(mode) => {
                next.mode = mode;
                match mode {
                    ThemeMode::Light => {
                        next.custom_background = LIGHT_BACKGROUND.to_string();
                        next.custom_text = LIGHT_TEXT.to_string();
                    }
                    ThemeMode::Dark => {
                        next.custom_background = DARK_BACKGROUND.to_string();
                        next.custom_text = DARK_TEXT.to_string();
                    }
                    ThemeMode::Custom => {}
                }
            }
            ThemeCommand::SetAccent(color) => next.custom_accent = validate_color(&color)?,
            ThemeCommand::SetBackground(color) => next.custom_background = validate_color(&color)?,
            ThemeCommand::SetText(color) => next.custom_text = validate_color(&color)?,
            ThemeCommand::Reset => next = Self::default(),
        }

        Ok(next)
    }
}

/// Check `#RRGGBB` and return the trimmed color
fn validate_color(color: &str) -> Result<String> {
    let color = color.trim();
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if valid {
        Ok(color.to_string())
    } else {
        Err(PreferencesError::InvalidInput(format!(
            "'{}' is not a #RRGGBB color",
            color
        )))
    }
}

/// Theme state persisted to a key-value store after every change
pub struct ThemeStore {
    state: ThemeState,
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ThemeStore {
    /// Load the theme stored under `key`, falling back to the default theme
    pub async fn restore(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();

        let state = match store.get(&key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Stored theme is malformed; using default");
                ThemeState::default()
            }),
            Ok(None) => ThemeState::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read theme; using default");
                ThemeState::default()
            }
        };

        Self { state, store, key }
    }

    /// Current theme
    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    /// Apply `command` and persist the result
    ///
    /// Only validation errors are returned. A failed write is logged and the
    /// in-memory theme keeps the change.
    pub async fn dispatch(&mut self, command: ThemeCommand) -> Result<&ThemeState> {
        self.state = self.state.apply(command)?;
        debug!(mode = ?self.state.mode, "Theme updated");

        if let Err(e) = self.save().await {
            warn!(key = %self.key, error = %e, "Failed to save theme");
        }
        Ok(&self.state)
    }

    async fn save(&self) -> Result<()> {
        let json = serde_json::to_string(&self.state)?;
        self.store.set(&self.key, &json).await?;
        Ok(())
    }
}
