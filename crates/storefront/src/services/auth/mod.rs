//! Authentication service.
//!
//! Provides the storefront's cosmetic sign-in. Credentials are validated for
//! shape only; any well-formed email and password are accepted and nothing is
//! stored except the resulting session.

mod error;

pub use error::AuthError;

use serde::Deserialize;
use tracing::{info, instrument, warn};

use techstore_core::Email;

use crate::events::{Notification, StoreEvent};
use crate::models::{Preferences, Session};
use crate::operations::OperationKind;
use crate::persistence::keys;
use crate::state::AppState;

/// Minimum password length for registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Login form input.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the form and return the parsed email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for an empty email or password and
    /// `AuthError::InvalidEmail` for a malformed email.
    pub fn validate(&self) -> Result<Email, AuthError> {
        let email = required("email", &self.email)?;
        required("password", &self.password)?;
        Ok(Email::parse(email)?)
    }
}

/// Registration form input.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Registration {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the form and return the trimmed name and parsed email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for any empty field,
    /// `AuthError::InvalidEmail` for a malformed email and
    /// `AuthError::WeakPassword` for a password under six characters.
    pub fn validate(&self) -> Result<(String, Email), AuthError> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        required("password", &self.password)?;
        let email = Email::parse(email)?;
        validate_password(&self.password)?;
        Ok((name.to_owned(), email))
    }
}

/// Authentication service.
///
/// Handles sign-in, registration, sign-out and per-session preferences.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// The current session, if signed in.
    pub async fn current(&self) -> Option<Session> {
        self.state.shop().await.session.clone()
    }

    /// Sign in with email and password.
    ///
    /// The display name is the local part of the email.
    ///
    /// # Errors
    ///
    /// Returns a validation `AuthError` for a malformed form, or
    /// `AuthError::Operation` if a newer sign-in replaced this one while it
    /// was waiting.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email = credentials
            .validate()
            .inspect_err(|e| self.reject("Login Failed", e))?;

        let display_name = email.local_part().to_owned();
        let session = Session::start(display_name, email);
        let welcome = Notification::success(
            "Welcome Back!",
            format!("Successfully logged in as {}", session.email),
        );
        self.establish(session, welcome).await
    }

    /// Register and sign in.
    ///
    /// # Errors
    ///
    /// Returns a validation `AuthError` for a malformed form, or
    /// `AuthError::Operation` if a newer sign-in replaced this one while it
    /// was waiting.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<Session, AuthError> {
        let (name, email) = registration
            .validate()
            .inspect_err(|e| self.reject("Registration Failed", e))?;

        let welcome = Notification::success(
            "Account Created!",
            format!("Welcome to TechStore, {name}!"),
        );
        self.establish(Session::start(name, email), welcome).await
    }

    /// Wait out the sign-in delay, then install `session` unless a newer
    /// sign-in started meanwhile.
    async fn establish(
        &self,
        session: Session,
        welcome: Notification,
    ) -> Result<Session, AuthError> {
        let ticket = self.state.operations().begin(OperationKind::SignIn)?;
        tokio::time::sleep(self.state.config().delays.sign_in).await;

        let mut shop = self.state.shop().await;
        ticket.complete()?;

        self.state.persistence().set(keys::USER, &session);
        shop.session = Some(session.clone());
        drop(shop);

        info!(session_id = %session.id, "Signed in");
        self.state.events().publish(StoreEvent::SessionChanged {
            display_name: Some(session.display_name.clone()),
        });
        self.state.events().notify(welcome);
        Ok(session)
    }

    /// Sign out. Returns whether a session was active.
    ///
    /// A sign-in still waiting out its delay is abandoned.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> bool {
        let mut shop = self.state.shop().await;
        self.state.operations().invalidate(OperationKind::SignIn);
        let previous = shop.session.take();
        self.state.persistence().remove(keys::USER);
        drop(shop);

        info!(was_signed_in = previous.is_some(), "Signed out");
        self.state
            .events()
            .publish(StoreEvent::SessionChanged { display_name: None });
        self.state.events().notify(Notification::success(
            "Logged Out",
            "You have been successfully logged out",
        ));
        previous.is_some()
    }

    /// Preferences for the current session, or the defaults when signed out
    /// or never saved.
    pub async fn preferences(&self) -> Preferences {
        let Some(session) = self.current().await else {
            return Preferences::default();
        };
        self.state
            .persistence()
            .get(&keys::preferences(&session.id))
            .unwrap_or_default()
    }

    /// Store preferences for the current session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` when there is no session.
    #[instrument(skip(self, preferences))]
    pub async fn save_preferences(
        &self,
        preferences: Preferences,
    ) -> Result<Preferences, AuthError> {
        let session = self.current().await.ok_or(AuthError::NotSignedIn)?;
        self.state
            .persistence()
            .set(&keys::preferences(&session.id), &preferences);
        Ok(preferences)
    }

    fn reject(&self, title: &str, error: &AuthError) {
        warn!(error = %error, "Rejected sign-in form");
        self.state
            .events()
            .notify(Notification::error(title, error.user_message()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Trim `value` and reject it if nothing is left.
fn required<'v>(field: &'static str, value: &'v str) -> Result<&'v str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingField { field });
    }
    Ok(trimmed)
}

/// Validate password length.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}
