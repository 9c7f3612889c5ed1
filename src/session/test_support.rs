//! In-process [`GovApi`] for controller tests; requests never touch a socket.

use crate::api::handlers::AppState;
use crate::api::models::{IdApplicationReceipt, PaymentReceipt, RegistrationReceipt, ReportReceipt};
use crate::api::routes::build_api_routes;
use crate::auth::models::LoginResponse;
use crate::core::Config;
use crate::session::client::{self, decode_response, GovApi};
use crate::session::error::{Result, SessionError};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt;

#[derive(Clone)]
pub struct RouterApi {
    router: Router,
    calls: Arc<AtomicUsize>,
}

impl RouterApi {
    pub fn new() -> Self {
        let state = AppState::from_config(&Config::defaults().expect("default config"));
        Self {
            router: build_api_routes(state),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of API requests made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let body = serde_json::to_vec(body).map_err(|e| SessionError::Decode(e.to_string()))?;
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        decode_response(status, &bytes)
    }
}

#[async_trait]
impl GovApi for RouterApi {
    async fn login(&self, phone: &str) -> Result<LoginResponse> {
        self.post(client::LOGIN_PATH, &client::login_body(phone)).await
    }

    async fn pay_tax(&self, token: &str, amount: Value, tax_type: Value) -> Result<PaymentReceipt> {
        self.post(client::PAY_PATH, &client::payment_body(token, amount, tax_type))
            .await
    }

    async fn register_business(&self, token: &str, data: Value) -> Result<RegistrationReceipt> {
        self.post(client::REGISTER_PATH, &client::registration_body(token, data))
            .await
    }

    async fn apply_for_id(&self, token: &str) -> Result<IdApplicationReceipt> {
        self.post(client::ID_APPLY_PATH, &client::id_application_body(token))
            .await
    }

    async fn submit_report(&self, token: Option<&str>, details: Option<&str>) -> Result<ReportReceipt> {
        self.post(client::REPORT_PATH, &client::report_body(token, details))
            .await
    }
}
