//! API routes

use crate::api::handlers::{
    apply_for_id, health_check, pay_tax, register_business, submit_report, AppState,
};
use crate::auth::handlers::login;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the API routes.
///
/// Every route is public; handlers that need a token check for it themselves.
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
        .route("/api/auth/login", post(login))
        .route("/api/payments/pay", post(pay_tax))
        .route("/api/pacra/register", post(register_business))
        .route("/api/id/apply", post(apply_for_id))
        .route("/api/reports/submit", post(submit_report))
        .with_state(state)
}
