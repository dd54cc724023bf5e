//! Session route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::models::{Preferences, Session};
use crate::services::{AuthService, Credentials, Registration};
use crate::state::AppState;

/// Header account-button display data.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account button label: `Hi, <name>` or `Login`.
    pub label: String,
}

impl From<Option<&Session>> for SessionView {
    fn from(session: Option<&Session>) -> Self {
        session.map_or_else(
            || Self {
                signed_in: false,
                display_name: None,
                email: None,
                label: "Login".to_string(),
            },
            |session| Self {
                signed_in: true,
                display_name: Some(session.display_name.clone()),
                email: Some(session.email.to_string()),
                label: format!("Hi, {}", session.display_name),
            },
        )
    }
}

/// The current session.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<SessionView> {
    let session = AuthService::new(&state).current().await;
    Json(SessionView::from(session.as_ref()))
}

/// Sign in.
#[instrument(skip(state, credentials))]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SessionView>> {
    let session = AuthService::new(&state).sign_in(&credentials).await?;
    set_sentry_user(&session.id, Some(session.email.as_str()));
    Ok(Json(SessionView::from(Some(&session))))
}

/// Register and sign in.
#[instrument(skip(state, registration))]
pub async fn register(
    State(state): State<AppState>,
    Json(registration): Json<Registration>,
) -> Result<Json<SessionView>> {
    let session = AuthService::new(&state).register(&registration).await?;
    set_sentry_user(&session.id, Some(session.email.as_str()));
    Ok(Json(SessionView::from(Some(&session))))
}

/// Sign out.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Json<SessionView> {
    AuthService::new(&state).sign_out().await;
    clear_sentry_user();
    Json(SessionView::from(None))
}

/// Preferences for the current session.
#[instrument(skip(state))]
pub async fn preferences(State(state): State<AppState>) -> Json<Preferences> {
    Json(AuthService::new(&state).preferences().await)
}

/// Save preferences for the current session.
#[instrument(skip(state))]
pub async fn save_preferences(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> Result<Json<Preferences>> {
    let saved = AuthService::new(&state)
        .save_preferences(preferences)
        .await?;
    Ok(Json(saved))
}
