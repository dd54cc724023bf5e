//! Session-related types.
//!
//! The session is cosmetic: it only changes what the storefront displays.
//! Nothing is verified and nothing is protected by it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use techstore_core::{CurrencyCode, Email};
use uuid::Uuid;

/// The signed-in shopper, persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Random per-sign-in identifier. Keys the shopper's preferences.
    pub id: String,
    /// Name shown in the header.
    pub display_name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Start a new session for `email` shown as `display_name`.
    #[must_use]
    pub fn start(display_name: impl Into<String>, email: Email) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            display_name: display_name.into(),
            email,
            created_at: Utc::now(),
        }
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Per-session display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub currency: CurrencyCode,
    pub language: String,
    pub notifications: bool,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::USD,
            language: "en".to_string(),
            notifications: true,
            theme: Theme::Light,
        }
    }
}
