//! Authentication module
//!
//! Mock login: any phone number is accepted and exchanged for a signed token.

pub mod handlers;
pub mod jwt;
pub mod models;

pub use handlers::login;
pub use jwt::{generate_token, Claims};
pub use models::{LoginRequest, LoginResponse};
