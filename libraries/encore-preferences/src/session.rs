//! Signed-in flag
//!
//! There is no account system behind this: signing in only checks that the
//! form fields were filled and flips a persisted flag. Credentials are never
//! stored.

use crate::error::{PreferencesError, Result};
use encore_core::KeyValueStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Key the signed-in flag is stored under
pub const SESSION_KEY: &str = "isLoggedIn";

const SIGNED_IN: &str = "true";

/// Persisted signed-in flag
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Sign in with an email and password
    ///
    /// # Errors
    /// `InvalidInput` if either field is blank; storage errors are returned
    /// because the caller has to know whether the flag was set.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        require_filled(&[("email", email), ("password", password)])?;
        self.store.set(SESSION_KEY, SIGNED_IN).await?;
        info!("Signed in");
        Ok(())
    }

    /// Create an account (cosmetic) and sign in
    pub async fn sign_up(&self, email: &str, full_name: &str, password: &str) -> Result<()> {
        require_filled(&[("email", email), ("full name", full_name), ("password", password)])?;
        self.store.set(SESSION_KEY, SIGNED_IN).await?;
        info!("Signed up");
        Ok(())
    }

    /// Clear the flag
    pub async fn sign_out(&self) -> Result<()> {
        self.store.remove(SESSION_KEY).await?;
        info!("Signed out");
        Ok(())
    }

    /// Whether the flag is set; read failures count as signed out
    pub async fn is_signed_in(&self) -> bool {
        match self.store.get(SESSION_KEY).await {
            Ok(value) => value.as_deref() == Some(SIGNED_IN),
            Err(e) => {
                warn!(error = %e, "Failed to read session flag; treating as signed out");
                false
            }
        }
    }
}

fn require_filled(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PreferencesError::InvalidInput(format!(
            "missing {}",
            missing.join(", ")
        )))
    }
}
