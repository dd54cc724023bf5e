//! Authentication error types.

use thiserror::Error;

use crate::operations::OperationError;

/// Errors that can occur during sign-in, registration and preference
/// operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required form field was empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] techstore_core::EmailError),

    /// Password too short.
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// The operation needs a session and there is none.
    #[error("not signed in")]
    NotSignedIn,

    /// The simulated sign-in did not take effect.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl AuthError {
    /// The form field at fault, for validation errors.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } => Some(*field),
            Self::InvalidEmail(_) => Some("email"),
            Self::WeakPassword { .. } => Some("password"),
            Self::NotSignedIn | Self::Operation(_) => None,
        }
    }

    /// Message shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { .. } => "Please fill in all fields".to_string(),
            Self::InvalidEmail(_) => "Please enter a valid email address".to_string(),
            Self::WeakPassword { min } => format!("Password must be at least {min} characters"),
            Self::NotSignedIn => "Please log in first".to_string(),
            Self::Operation(e) => e.to_string(),
        }
    }
}
