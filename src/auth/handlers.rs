//! Authentication API handlers

use crate::api::handlers::AppState;
use crate::api::models::{field_text, required};
use crate::auth::jwt::generate_token;
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::core::error::{GovError, Result};
use axum::{extract::State, Json};

/// Handler for POST /api/auth/login
///
/// Any non-empty phone is accepted; the NRC echoes it back.
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    let nrc = required(&req.phone)
        .map(field_text)
        .ok_or_else(|| GovError::ValidationError("Phone number is required".to_string()))?;

    let token = generate_token(&nrc, &state.jwt_secret, state.token_ttl)?;

    tracing::info!(nrc = %nrc, "Login successful");

    Ok(Json(LoginResponse {
        name: state.citizen_name.to_string(),
        nrc,
        token,
    }))
}
