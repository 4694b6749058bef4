use crate::domain::payment::PaymentRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod acquiring_bank;
pub mod mock;

/// Body of the acquiring bank's `POST /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankPaymentRequest {
    pub card_number: String,
    pub expiry_date: String,
    pub currency: String,
    pub amount: i64,
    pub cvv: String,
}

impl BankPaymentRequest {
    pub fn from_request(req: &PaymentRequest) -> Self {
        Self {
            card_number: req.normalized_card_number(),
            expiry_date: format_expiry_date(req.expiry_month, req.expiry_year),
            currency: req.currency.clone(),
            amount: req.amount,
            cvv: req.cvv.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BankPaymentResponse {
    #[serde(default)]
    pub authorized: bool,
    #[serde(default)]
    pub authorization_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// The bank's decision for one payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAuthorization {
    pub authorized: bool,
    pub authorization_code: Option<String>,
    pub error_message: Option<String>,
}

impl From<BankPaymentResponse> for BankAuthorization {
    fn from(resp: BankPaymentResponse) -> Self {
        let non_empty = |s: Option<String>| s.filter(|v| !v.is_empty());
        Self {
            authorized: resp.authorized,
            authorization_code: non_empty(resp.authorization_code),
            error_message: non_empty(resp.error_message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("bank service is unavailable: {0}")]
    Unavailable(String),
    #[error("bank rejected request (400): {0}")]
    Rejected(String),
    #[error("failed to decode bank response: {0}")]
    Decode(String),
    #[error("unexpected status code from bank: {0}")]
    UnexpectedStatus(u16),
}

impl BankError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, BankError::Unavailable(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BankError::Unavailable(_) => "UNAVAILABLE",
            BankError::Rejected(_) => "REJECTED",
            BankError::Decode(_) => "DECODE_ERROR",
            BankError::UnexpectedStatus(_) => "UNEXPECTED_STATUS",
        }
    }
}

#[async_trait::async_trait]
pub trait BankGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn authorize(&self, request: &PaymentRequest) -> Result<BankAuthorization, BankError>;
}

/// `MM/YYYY` with the month zero-padded.
pub fn format_expiry_date(month: i32, year: i32) -> String {
    format!("{:02}/{}", month, year)
}
