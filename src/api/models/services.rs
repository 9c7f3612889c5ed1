use serde::{Deserialize, Serialize};
use serde_json::Value;

// Payments (ZRA tax) API models

/// Request body for POST /api/payments/pay
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    pub token: Value,
    /// Echoed back verbatim, whatever its JSON type
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub tax_type: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub status: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub amount: Value,
    pub tax_type: Value,
}

// PACRA business registration API models

/// Request body for POST /api/pacra/register
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub token: Value,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub status: String,
    pub reg_no: String,
}

// National ID application API models

/// Request body for POST /api/id/apply
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IdApplicationRequest {
    #[serde(default)]
    pub token: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdApplicationReceipt {
    pub status: String,
    pub app_id: String,
}

// Corruption report API models

/// Request body for POST /api/reports/submit; every field is optional
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub token: Value,
    #[serde(default)]
    pub details: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportReceipt {
    pub status: String,
    pub case_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_receipt_wire_names() {
        let receipt = PaymentReceipt {
            status: "OK".to_string(),
            reference: "ZMTAX-ABCD1234".to_string(),
            amount: json!(150),
            tax_type: json!("PAYE"),
        };
        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(
            value,
            json!({"status": "OK", "ref": "ZMTAX-ABCD1234", "amount": 150, "taxType": "PAYE"})
        );
    }

    #[test]
    fn test_requests_tolerate_missing_fields() {
        let payment: PaymentRequest = serde_json::from_value(json!({})).unwrap();
        assert!(payment.token.is_null());
        assert!(payment.amount.is_null());

        let report: ReportRequest = serde_json::from_value(json!({"details": "bribe at checkpoint"})).unwrap();
        assert_eq!(report.details, json!("bribe at checkpoint"));
        assert!(report.token.is_null());
    }

    #[test]
    fn test_requests_accept_any_token_type() {
        let payment: PaymentRequest =
            serde_json::from_value(json!({"token": 42, "amount": 10, "taxType": "PAYE"})).unwrap();
        assert_eq!(payment.token, json!(42));
    }
}
