//! Gateway from the session controller to the mock API

use crate::api::models::{
    IdApplicationReceipt, IdApplicationRequest, PaymentReceipt, PaymentRequest, RegistrationReceipt,
    RegistrationRequest, ReportReceipt, ReportRequest,
};
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::session::error::{Result, SessionError};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const PAY_PATH: &str = "/api/payments/pay";
pub const REGISTER_PATH: &str = "/api/pacra/register";
pub const ID_APPLY_PATH: &str = "/api/id/apply";
pub const REPORT_PATH: &str = "/api/reports/submit";

/// One method per mock endpoint; each call is a single request
#[async_trait]
pub trait GovApi: Send + Sync {
    async fn login(&self, phone: &str) -> Result<LoginResponse>;

    async fn pay_tax(&self, token: &str, amount: Value, tax_type: Value) -> Result<PaymentReceipt>;

    async fn register_business(&self, token: &str, data: Value) -> Result<RegistrationReceipt>;

    async fn apply_for_id(&self, token: &str) -> Result<IdApplicationReceipt>;

    async fn submit_report(&self, token: Option<&str>, details: Option<&str>) -> Result<ReportReceipt>;
}

/// Request bodies in the shape the endpoints expect
pub fn login_body(phone: &str) -> LoginRequest {
    LoginRequest {
        phone: Value::from(phone),
    }
}

pub fn payment_body(token: &str, amount: Value, tax_type: Value) -> PaymentRequest {
    PaymentRequest {
        token: Value::from(token),
        amount,
        tax_type,
    }
}

pub fn registration_body(token: &str, data: Value) -> RegistrationRequest {
    RegistrationRequest {
        token: Value::from(token),
        data,
    }
}

pub fn id_application_body(token: &str) -> IdApplicationRequest {
    IdApplicationRequest {
        token: Value::from(token),
    }
}

pub fn report_body(token: Option<&str>, details: Option<&str>) -> ReportRequest {
    ReportRequest {
        token: token.map(Value::from).unwrap_or_default(),
        details: details.map(Value::from).unwrap_or_default(),
    }
}

/// Turn a raw status and body into a typed receipt or an inline error message
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    if (200..300).contains(&status) {
        return serde_json::from_slice(body).map_err(|e| SessionError::Decode(e.to_string()));
    }

    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    Err(SessionError::Api { status, message })
}

/// [`GovApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpGovApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGovApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "Calling API");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        decode_response(status, &bytes)
    }
}

#[async_trait]
impl GovApi for HttpGovApi {
    async fn login(&self, phone: &str) -> Result<LoginResponse> {
        self.post(LOGIN_PATH, &login_body(phone)).await
    }

    async fn pay_tax(&self, token: &str, amount: Value, tax_type: Value) -> Result<PaymentReceipt> {
        self.post(PAY_PATH, &payment_body(token, amount, tax_type)).await
    }

    async fn register_business(&self, token: &str, data: Value) -> Result<RegistrationReceipt> {
        self.post(REGISTER_PATH, &registration_body(token, data)).await
    }

    async fn apply_for_id(&self, token: &str) -> Result<IdApplicationReceipt> {
        self.post(ID_APPLY_PATH, &id_application_body(token)).await
    }

    async fn submit_report(&self, token: Option<&str>, details: Option<&str>) -> Result<ReportReceipt> {
        self.post(REPORT_PATH, &report_body(token, details)).await
    }
}
