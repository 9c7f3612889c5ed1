use crate::api::models::{required, RegistrationReceipt, RegistrationRequest, STATUS_OK};
use crate::core::error::{GovError, Result};
use crate::core::ids;
use axum::Json;

/// Handler for POST /api/pacra/register - Register a business
pub async fn register_business(
    payload: Option<Json<RegistrationRequest>>,
) -> Result<Json<RegistrationReceipt>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    required(&req.token)
        .ok_or_else(|| GovError::UnauthenticatedError("Not authenticated".to_string()))?;

    let reg_no = ids::registration_number();
    tracing::info!(reg_no = %reg_no, has_data = !req.data.is_null(), "Business registered");

    Ok(Json(RegistrationReceipt {
        status: STATUS_OK.to_string(),
        reg_no,
    }))
}
