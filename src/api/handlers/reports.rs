use crate::api::models::{required, ReportReceipt, ReportRequest, STATUS_OK};
use crate::core::ids;
use axum::Json;

/// Handler for POST /api/reports/submit - File a corruption report
///
/// Reports may be anonymous, so this never fails: a missing or malformed
/// body is accepted like an empty one.
pub async fn submit_report(payload: Option<Json<ReportRequest>>) -> Json<ReportReceipt> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    let case_id = ids::case_id();
    tracing::info!(
        case_id = %case_id,
        anonymous = required(&req.token).is_none(),
        details_len = req.details.as_str().map_or(0, str::len),
        "Corruption report filed"
    );

    Json(ReportReceipt {
        status: STATUS_OK.to_string(),
        case_id,
    })
}
