//! SmartGov Zambia
//!
//! A mock government-services API (login, tax payment, PACRA business
//! registration, national ID applications, corruption reports) together with
//! the client-side session controller that drives the citizen's screens.

pub mod api;
pub mod auth;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Config, GovError};
pub use api::ApiServer;
pub use session::{Screen, SessionController, User, View};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
