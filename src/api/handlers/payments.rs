use crate::api::models::{required, PaymentReceipt, PaymentRequest, STATUS_OK};
use crate::core::error::{GovError, Result};
use crate::core::ids;
use axum::Json;

/// Handler for POST /api/payments/pay - Pay a tax
///
/// `amount` and `taxType` are echoed back untouched.
pub async fn pay_tax(payload: Option<Json<PaymentRequest>>) -> Result<Json<PaymentReceipt>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    required(&req.token)
        .ok_or_else(|| GovError::UnauthenticatedError("Not authenticated".to_string()))?;

    let receipt = PaymentReceipt {
        status: STATUS_OK.to_string(),
        reference: ids::payment_ref(),
        amount: req.amount,
        tax_type: req.tax_type,
    };

    tracing::info!(
        reference = %receipt.reference,
        amount = %receipt.amount,
        tax_type = %receipt.tax_type,
        "Tax payment accepted"
    );

    Ok(Json(receipt))
}
