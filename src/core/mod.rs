//! Core application layer
//!
//! - Configuration management
//! - Structured logging system
//! - Error handling and type system
//! - Receipt reference generators

pub mod config;
pub mod error;
pub mod ids;
pub mod logging;

pub use config::Config;
pub use error::{ErrorResponse, GovError, Result};
pub use logging::Logger;
