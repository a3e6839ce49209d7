//! # Request Validation
//!
//! Pure checks run on a request's parameter mapping before it is sent.
//! Each validator reports the first violation in a fixed order:
//!
//! 1. required fields present and non-empty
//! 2. amount numeric and positive
//! 3. currency in the allow-list (case-insensitive)
//! 4. redirect URLs well-formed (hosted sessions only)

use crate::currency::Currency;
use crate::error::ValidationError;
use serde_json::{Map, Value};
use url::Url;

/// A request as a JSON parameter mapping
pub type Params = Map<String, Value>;

/// Required fields for `POST /api/v1/create-payment`
pub const PAYMENT_FIELDS: &[&str] = &["amount", "currency", "order_id"];

/// Required fields for `POST /api/v1/hosted/sessions`
pub const HOSTED_SESSION_FIELDS: &[&str] =
    &["amount", "currency", "order_id", "success_url", "cancel_url"];

/// Required fields for `POST /api/v1/payment-links`
pub const PAYMENT_LINK_FIELDS: &[&str] = &["amount", "currency", "description"];

/// Validate a create-payment request
pub fn validate_payment(params: &Params) -> Result<(), ValidationError> {
    check_required(params, PAYMENT_FIELDS)?;
    check_amount(params)?;
    check_currency(params)
}

/// Validate a hosted-session request
pub fn validate_hosted_session(params: &Params) -> Result<(), ValidationError> {
    check_required(params, HOSTED_SESSION_FIELDS)?;
    check_amount(params)?;
    check_currency(params)?;

    if !params.get("success_url").is_some_and(is_absolute_url) {
        return Err(ValidationError::InvalidSuccessUrl);
    }
    if !params.get("cancel_url").is_some_and(is_absolute_url) {
        return Err(ValidationError::InvalidCancelUrl);
    }
    Ok(())
}

/// Validate a payment-link request
pub fn validate_payment_link(params: &Params) -> Result<(), ValidationError> {
    check_required(params, PAYMENT_LINK_FIELDS)?;
    check_amount(params)?;
    check_currency(params)
}

/// Upper-case a string `currency` in place.
///
/// Runs before validation so the value that is checked is the value that is sent.
pub fn normalize_currency(params: &mut Params) {
    if let Some(Value::String(code)) = params.get_mut("currency") {
        *code = code.trim().to_ascii_uppercase();
    }
}

/// Reject an empty identifier before it is spliced into a request path
pub fn require_id(field: &str, id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    Ok(())
}

/// Read a JSON number, or a string holding one, as `f64`
pub fn numeric_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn check_required(params: &Params, fields: &[&str]) -> Result<(), ValidationError> {
    for field in fields {
        if params.get(*field).map_or(true, is_empty) {
            return Err(ValidationError::MissingField((*field).to_string()));
        }
    }
    Ok(())
}

fn check_amount(params: &Params) -> Result<(), ValidationError> {
    match params.get("amount").and_then(numeric_value) {
        Some(amount) if amount > 0.0 => Ok(()),
        _ => Err(ValidationError::InvalidAmount),
    }
}

fn check_currency(params: &Params) -> Result<(), ValidationError> {
    params
        .get("currency")
        .and_then(Value::as_str)
        .and_then(Currency::parse)
        .map(|_| ())
        .ok_or(ValidationError::UnsupportedCurrency)
}

// Numbers and booleans are values, never "missing".
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) | Value::Bool(_) => false,
    }
}

fn is_absolute_url(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|s| Url::parse(s).ok())
        .is_some_and(|url| !url.cannot_be_a_base() && url.host_str().is_some_and(|h| !h.is_empty()))
}
