//! Profile form validation and draft caching

use crate::error::{PreferencesError, Result};
use encore_core::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key the unsent draft is cached under
pub const PROFILE_DRAFT_KEY: &str = "profileFormData";

/// Genres offered by the form
pub const GENRES: [&str; 5] = ["Pop", "Rock", "Jazz", "Classical", "Hip-Hop"];

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;

/// Profile form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub username: String,
    pub email: String,
    pub genre: String,
}

/// Form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Email,
    Genre,
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Genre => "genre",
        };
        f.write_str(name)
    }
}

/// First failing rule for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFieldError {
    pub field: ProfileField,
    pub message: &'static str,
}

impl fmt::Display for ProfileFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_username(username: &str) -> Option<ProfileFieldError> {
    let len = username.chars().count();
    let message = if len < USERNAME_MIN {
        "Username must be at least 3 characters"
    } else if len > USERNAME_MAX {
        "Username must be less than 20 characters"
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        "Username can only contain letters, numbers, and underscores"
    } else {
        return None;
    };

    Some(ProfileFieldError {
        field: ProfileField::Username,
        message,
    })
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot with text on both
/// sides somewhere after the `@`
pub fn validate_email(email: &str) -> Option<ProfileFieldError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
                && domain
                    .char_indices()
                    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
        }
        None => false,
    };

    if valid {
        None
    } else {
        Some(ProfileFieldError {
            field: ProfileField::Email,
            message: "Please enter a valid email address",
        })
    }
}

pub fn validate_genre(genre: &str) -> Option<ProfileFieldError> {
    if genre.is_empty() {
        Some(ProfileFieldError {
            field: ProfileField::Genre,
            message: "Please select a genre",
        })
    } else if !GENRES.contains(&genre) {
        Some(ProfileFieldError {
            field: ProfileField::Genre,
            message: "Please choose one of the listed genres",
        })
    } else {
        None
    }
}

impl ProfileDraft {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            genre: genre.into(),
        }
    }

    /// Every field error, in form order
    pub fn validate(&self) -> Vec<ProfileFieldError> {
        [
            validate_username(&self.username),
            validate_email(&self.email),
            validate_genre(&self.genre),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.email.is_empty() && self.genre.is_empty()
    }
}

/// Unsent profile draft, cached so the form survives restarts
pub struct ProfileDraftCache {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileDraftCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Cached draft, or an empty one if nothing usable is stored
    pub async fn load(&self) -> ProfileDraft {
        match self.store.get(PROFILE_DRAFT_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Cached profile draft is malformed");
                ProfileDraft::default()
            }),
            Ok(None) => ProfileDraft::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read cached profile draft");
                ProfileDraft::default()
            }
        }
    }

    pub async fn save(&self, draft: &ProfileDraft) -> Result<()> {
        let json = serde_json::to_string(draft)?;
        self.store.set(PROFILE_DRAFT_KEY, &json).await?;
        debug!("Cached profile draft");
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(PROFILE_DRAFT_KEY).await?;
        Ok(())
    }

    /// Validate `draft`; on success the cached draft is discarded
    ///
    /// # Errors
    /// `Validation` with every failing field. The cache is left alone so the
    /// user can fix the form.
    pub async fn submit(&self, draft: ProfileDraft) -> Result<ProfileDraft> {
        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(PreferencesError::Validation(errors));
        }

        if let Err(e) = self.clear().await {
            warn!(error = %e, "Profile saved but cached draft was not cleared");
        }
        Ok(draft)
    }
}
