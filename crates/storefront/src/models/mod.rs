//! Domain models owned by the storefront (as opposed to `techstore-core`).

pub mod session;

pub use session::{Preferences, Session, Theme};
