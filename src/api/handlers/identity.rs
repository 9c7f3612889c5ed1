use crate::api::models::{required, IdApplicationReceipt, IdApplicationRequest, STATUS_OK};
use crate::core::error::{GovError, Result};
use crate::core::ids;
use axum::Json;

/// Handler for POST /api/id/apply - Apply for a national ID
pub async fn apply_for_id(
    payload: Option<Json<IdApplicationRequest>>,
) -> Result<Json<IdApplicationReceipt>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    required(&req.token)
        .ok_or_else(|| GovError::UnauthenticatedError("Not authenticated".to_string()))?;

    let app_id = ids::id_application_id();
    tracing::info!(app_id = %app_id, "ID application received");

    Ok(Json(IdApplicationReceipt {
        status: STATUS_OK.to_string(),
        app_id,
    }))
}
