use crate::domain::payment::PaymentRequest;
use crate::gateways::{BankAuthorization, BankError, BankGateway};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
pub enum MockBehavior {
    AlwaysAuthorize,
    AlwaysDecline,
    Unavailable,
    /// Mirrors the acquiring-bank simulator: last card digit odd authorizes,
    /// even declines, zero is unavailable.
    CardParity,
    Fixed(Result<BankAuthorization, BankError>),
}

impl MockBehavior {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ALWAYS_AUTHORIZE" | "ALWAYS_SUCCESS" => Some(Self::AlwaysAuthorize),
            "ALWAYS_DECLINE" | "ALWAYS_FAILURE" => Some(Self::AlwaysDecline),
            "UNAVAILABLE" | "ALWAYS_TIMEOUT" => Some(Self::Unavailable),
            "CARD_PARITY" => Some(Self::CardParity),
            _ => None,
        }
    }
}

/// In-process bank that answers without a network round trip.
pub struct MockBank {
    pub behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockBank {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn authorized() -> BankAuthorization {
    BankAuthorization {
        authorized: true,
        authorization_code: Some(format!("mock_auth_{}", uuid::Uuid::new_v4())),
        error_message: None,
    }
}

fn declined() -> BankAuthorization {
    BankAuthorization {
        authorized: false,
        authorization_code: None,
        error_message: Some("mock decline".to_string()),
    }
}

#[async_trait::async_trait]
impl BankGateway for MockBank {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn authorize(&self, request: &PaymentRequest) -> Result<BankAuthorization, BankError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::AlwaysAuthorize => Ok(authorized()),
            MockBehavior::AlwaysDecline => Ok(declined()),
            MockBehavior::Unavailable => {
                Err(BankError::Unavailable("mock bank unavailable".to_string()))
            }
            MockBehavior::CardParity => {
                let last = request
                    .normalized_card_number()
                    .chars()
                    .last()
                    .and_then(|c| c.to_digit(10));
                match last {
                    Some(0) | None => {
                        Err(BankError::Unavailable("mock bank unavailable".to_string()))
                    }
                    Some(d) if d % 2 == 1 => Ok(authorized()),
                    Some(_) => Ok(declined()),
                }
            }
            MockBehavior::Fixed(result) => result.clone(),
        }
    }
}
