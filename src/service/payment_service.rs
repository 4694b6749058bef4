use crate::domain::payment::{PaymentOutcome, PaymentRequest, PaymentStatus};
use crate::domain::validation::{validate_now, ValidationError};
use crate::gateways::{BankError, BankGateway};
use crate::repo::payments_repo::{LedgerError, PaymentsRepo};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

/// Why a submission ended without a recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Rejected(#[from] ValidationError),
    #[error("bank authorization failed: {0}")]
    Failed(#[from] BankError),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
}

impl SubmitError {
    pub fn payment_status(&self) -> PaymentStatus {
        match self {
            SubmitError::Rejected(_) => PaymentStatus::Rejected,
            SubmitError::Failed(_) | SubmitError::Ledger(_) => PaymentStatus::Failed,
        }
    }

    /// Message safe to return to the merchant. Bank error detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            SubmitError::Rejected(e) => e.to_string(),
            SubmitError::Failed(_) => "Financial institution unavailable".to_string(),
            SubmitError::Ledger(_) => "payment could not be recorded".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct PaymentService {
    pub payments_repo: PaymentsRepo,
    pub bank: Arc<dyn BankGateway>,
}

impl PaymentService {
    pub fn new(payments_repo: PaymentsRepo, bank: Arc<dyn BankGateway>) -> Self {
        Self {
            payments_repo,
            bank,
        }
    }

    /// Validates, authorizes with the bank and records the outcome.
    ///
    /// Only Authorized and Declined outcomes reach the ledger; the id is
    /// assigned after the bank has answered.
    pub async fn submit(&self, req: PaymentRequest) -> Result<PaymentOutcome, SubmitError> {
        if let Err(e) = validate_now(&req) {
            tracing::info!(reason = %e, "payment rejected");
            return Err(e.into());
        }

        let start = Instant::now();
        let authorization = match self.bank.authorize(&req).await {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(
                    bank = self.bank.name(),
                    kind = e.kind(),
                    error = %e,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "bank authorization failed"
                );
                return Err(e.into());
            }
        };

        let status = if authorization.authorized {
            PaymentStatus::Authorized
        } else {
            PaymentStatus::Declined
        };

        let outcome = PaymentOutcome {
            id: Uuid::new_v4(),
            payment_status: status,
            card_number_last_four: req.card_number_last_four(),
            expiry_month: req.expiry_month,
            expiry_year: req.expiry_year,
            currency: req.currency,
            amount: req.amount,
        };

        self.payments_repo.add(outcome.clone()).await?;

        tracing::info!(
            payment_id = %outcome.id,
            status = ?outcome.payment_status,
            authorization_code = authorization.authorization_code.as_deref().unwrap_or(""),
            decline_reason = authorization.error_message.as_deref().unwrap_or(""),
            latency_ms = start.elapsed().as_millis() as u64,
            "payment recorded"
        );

        Ok(outcome)
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Option<PaymentOutcome>, LedgerError> {
        self.payments_repo.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_failures_collapse_to_one_public_message() {
        let errors = [
            BankError::Unavailable("refused".to_string()),
            BankError::Rejected("{}".to_string()),
            BankError::Decode("eof".to_string()),
            BankError::UnexpectedStatus(500),
        ];
        for e in errors {
            let err = SubmitError::from(e);
            assert_eq!(err.payment_status(), PaymentStatus::Failed);
            assert_eq!(err.public_message(), "Financial institution unavailable");
        }
    }

    #[tokio::test]
    async fn closed_ledger_fails_submission() {
        use crate::gateways::mock::{MockBank, MockBehavior};
        use chrono::Datelike;

        let bank = Arc::new(MockBank::new(MockBehavior::AlwaysAuthorize));
        let svc = PaymentService::new(PaymentsRepo::closed(), bank.clone());
        let req = PaymentRequest {
            card_number: "1234567890123456".to_string(),
            expiry_month: 12,
            expiry_year: chrono::Utc::now().year() + 1,
            currency: "USD".to_string(),
            amount: 1000,
            cvv: "123".to_string(),
        };

        let err = svc.submit(req).await.unwrap_err();
        assert_eq!(err, SubmitError::Ledger(LedgerError::Closed));
        assert_eq!(err.payment_status(), PaymentStatus::Failed);
        assert_eq!(bank.calls(), 1);

        assert_eq!(svc.fetch(Uuid::new_v4()).await, Err(LedgerError::Closed));
    }

    #[test]
    fn rejection_keeps_validation_message() {
        let err = SubmitError::from(ValidationError::CurrencyUnsupported);
        assert_eq!(err.payment_status(), PaymentStatus::Rejected);
        assert_eq!(err.public_message(), "currency not supported");
    }
}
