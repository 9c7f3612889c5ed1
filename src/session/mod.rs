//! Client-side session and navigation
//!
//! This module provides what the citizen-facing client needs:
//! - The session state machine over screens
//! - A durable local copy of the signed-in user
//! - A gateway to the mock API
//! - The controller tying those together

pub mod client;
pub mod controller;
pub mod error;
pub mod model;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{GovApi, HttpGovApi};
pub use controller::SessionController;
pub use error::SessionError;
pub use model::{ActionResult, DocumentEntry, Screen, Session, User, View};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, SessionStore};
