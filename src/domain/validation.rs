use crate::domain::payment::PaymentRequest;
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

pub const SUPPORTED_CURRENCIES: [&str; 3] = ["USD", "EUR", "BRL"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("currency is required")]
    CurrencyRequired,
    #[error("currency not supported")]
    CurrencyUnsupported,
    #[error("amount must be greater than 0")]
    AmountInvalid,
    #[error("card_number is required")]
    CardNumberEmpty,
    #[error("card_number must contain only numeric characters")]
    CardNumberFormat,
    #[error("card_number must be between 14 and 19 characters")]
    CardNumberLength,
    #[error("cvv is required")]
    CvvEmpty,
    #[error("cvv must contain only numeric characters")]
    CvvFormat,
    #[error("cvv must be 3 or 4 characters")]
    CvvLength,
    #[error("expiry_month must be between 1 and 12")]
    ExpiryMonthInvalid,
    #[error("expiry_year must be in the future")]
    ExpiryYearPast,
    #[error("expiry date must be in the future")]
    ExpiryDatePast,
}

/// Checks a request against the business rules as of `today`.
///
/// Rules run in a fixed order and the first failure is returned.
pub fn validate(req: &PaymentRequest, today: NaiveDate) -> Result<(), ValidationError> {
    validate_currency(&req.currency)?;
    validate_amount(req.amount)?;
    validate_card_number(&req.card_number)?;
    validate_cvv(&req.cvv)?;
    validate_expiry(req.expiry_month, req.expiry_year, today)
}

pub fn validate_now(req: &PaymentRequest) -> Result<(), ValidationError> {
    validate(req, chrono::Utc::now().date_naive())
}

fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency.is_empty() {
        return Err(ValidationError::CurrencyRequired);
    }
    if !SUPPORTED_CURRENCIES.contains(&currency) {
        return Err(ValidationError::CurrencyUnsupported);
    }
    Ok(())
}

fn validate_amount(amount: i64) -> Result<(), ValidationError> {
    if amount <= 0 {
        return Err(ValidationError::AmountInvalid);
    }
    Ok(())
}

fn validate_card_number(card_number: &str) -> Result<(), ValidationError> {
    if card_number.is_empty() {
        return Err(ValidationError::CardNumberEmpty);
    }
    let clean = card_number.replace(' ', "");
    if !is_numeric(&clean) {
        return Err(ValidationError::CardNumberFormat);
    }
    if !(14..=19).contains(&clean.len()) {
        return Err(ValidationError::CardNumberLength);
    }
    Ok(())
}

fn validate_cvv(cvv: &str) -> Result<(), ValidationError> {
    if cvv.is_empty() {
        return Err(ValidationError::CvvEmpty);
    }
    if !is_numeric(cvv) {
        return Err(ValidationError::CvvFormat);
    }
    if !(3..=4).contains(&cvv.len()) {
        return Err(ValidationError::CvvLength);
    }
    Ok(())
}

fn validate_expiry(month: i32, year: i32, today: NaiveDate) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::ExpiryMonthInvalid);
    }
    let current_year = today.year();
    let current_month = today.month() as i32;
    if year < current_year {
        return Err(ValidationError::ExpiryYearPast);
    }
    if year == current_year && month < current_month {
        return Err(ValidationError::ExpiryDatePast);
    }
    Ok(())
}

// Non-empty and ASCII digits only.
fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
