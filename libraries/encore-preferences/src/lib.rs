//! Encore - Preferences
//!
//! Small persisted user preferences that sit next to the playlist:
//! - Theme mode and colors (`ThemeStore`)
//! - The signed-in flag (`Session`)
//! - Profile form validation with a cached draft (`ProfileDraftCache`)
//!
//! Everything is stored through `encore_core::KeyValueStore`.

mod error;
pub mod profile;
pub mod session;
pub mod theme;

pub use error::{PreferencesError, Result};
pub use profile::{ProfileDraft, ProfileDraftCache, ProfileField, ProfileFieldError, GENRES};
pub use session::Session;
pub use theme::{ThemeCommand, ThemeMode, ThemeState, ThemeStore, THEME_STORAGE_KEY};
