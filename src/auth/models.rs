//! Authentication request/response models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login request
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Any JSON type is accepted; the NRC is its text form
    #[serde(default)]
    pub phone: Value,
}

/// Login response, stored by the client as its session user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub name: String,
    pub nrc: String,
    pub token: String,
}
