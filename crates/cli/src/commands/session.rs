//! Session commands.

use tracing::info;

use techstore_storefront::services::{AuthService, Credentials, Registration};
use techstore_storefront::state::AppState;

/// Show who is signed in.
pub async fn show(state: &AppState) {
    match AuthService::new(state).current().await {
        Some(session) => info!(
            "Hi, {} <{}> (since {})",
            session.display_name, session.email, session.created_at
        ),
        None => info!("Not signed in"),
    }
}

/// Sign in.
///
/// # Errors
///
/// Returns an error if the email or password is missing or malformed.
pub async fn login(
    state: &AppState,
    email: String,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    AuthService::new(state)
        .sign_in(&Credentials { email, password })
        .await?;
    Ok(())
}

/// Register and sign in.
///
/// # Errors
///
/// Returns an error if a field is missing, the email is malformed or the
/// password is too short.
pub async fn register(
    state: &AppState,
    name: String,
    email: String,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    AuthService::new(state)
        .register(&Registration {
            name,
            email,
            password,
        })
        .await?;
    Ok(())
}

/// Sign out.
pub async fn logout(state: &AppState) {
    AuthService::new(state).sign_out().await;
}
