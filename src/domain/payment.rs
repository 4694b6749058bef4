use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Raw card payment as submitted by a merchant.
///
/// Every field defaults when absent so that a partial body reaches the
/// validator and gets a precise rejection message instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PaymentRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub card_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expiry_month: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub expiry_year: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cvv: String,
}

// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PaymentRequest {
    /// Card number with interior spaces removed.
    pub fn normalized_card_number(&self) -> String {
        self.card_number.replace(' ', "")
    }

    pub fn card_number_last_four(&self) -> String {
        let digits: Vec<char> = self.normalized_card_number().chars().collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Authorized,
    Declined,
    Rejected,
    Failed,
}

/// Recorded result of a payment the bank answered definitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub id: Uuid,
    pub payment_status: PaymentStatus,
    pub card_number_last_four: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub currency: String,
    pub amount: i64,
}

/// Body returned for submissions that never reached the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, status: PaymentStatus) -> Self {
        Self {
            error_message: message.into(),
            payment_status: Some(status),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
            payment_status: None,
        }
    }
}
