pub mod identity;
pub mod pacra;
pub mod payments;
pub mod reports;
pub mod system;

pub use identity::*;
pub use pacra::*;
pub use payments::*;
pub use reports::*;
pub use system::*;

use crate::core::config::{Config, MAX_TOKEN_TTL_HOURS};
use std::sync::Arc;

/// Shared application state for handlers.
///
/// Read-only: handlers never write to it, so requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub jwt_secret: Arc<String>,
    pub token_ttl: chrono::Duration,
    pub citizen_name: Arc<String>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let hours = config.security.token_ttl_hours.min(MAX_TOKEN_TTL_HOURS);
        let hours = i64::try_from(hours).unwrap_or(24);
        Self {
            jwt_secret: Arc::new(config.security.jwt_secret.clone()),
            token_ttl: chrono::Duration::hours(hours),
            citizen_name: Arc::new(config.mock.citizen_name.clone()),
        }
    }
}
