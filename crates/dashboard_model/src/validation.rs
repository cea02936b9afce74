use admin_session::AppError;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Form errors caught before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("Amount exceeds the available {available} {currency}")]
    ExceedsAvailable { available: String, currency: String },
    #[error("No customer selected")]
    NoCustomer,
    #[error("No bond selected")]
    NoBond,
    #[error("Customer ID is missing")]
    MissingCustomerId,
    #[error("Customer ID not found. Please initiate a trade first to fetch the customer ID.")]
    MissingCybridMapping,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{field} must be an http(s) URL")]
    InvalidUrl { field: &'static str },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Parse a user-entered amount; must be finite and strictly positive.
///
/// # Errors
/// `InvalidAmount` for anything else.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidAmount)?;
    require_positive(amount)
}

/// # Errors
/// `InvalidAmount` unless `amount` is finite and `> 0`.
pub fn require_positive(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::InvalidAmount)
    }
}

/// # Errors
/// `InvalidEmail` when the address does not look like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    let valid = EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// # Errors
/// `Required` when the trimmed value is empty.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("1,500.25"), Ok(1500.25));
        assert_eq!(parse_amount("0"), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount("-5"), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount("abc"), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount("NaN"), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount(""), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn messages_match_form_copy() {
        assert_eq!(ValidationError::InvalidAmount.to_string(), "Please enter a valid amount");
        assert_eq!(ValidationError::NoCustomer.to_string(), "No customer selected");
    }

    #[test]
    fn converts_to_validation_app_error() {
        let err: AppError = ValidationError::InvalidAmount.into();
        assert!(err.is_validation());
        assert_eq!(err.status(), 0);
    }

    #[test]
    fn emails() {
        assert!(validate_email("ops@borabond.com").is_ok());
        assert!(validate_email("ops@borabond").is_err());
        assert!(validate_email("o ps@borabond.com").is_err());
    }
}
