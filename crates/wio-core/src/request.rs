//! # Request Types
//!
//! Typed builders for the gateway's write operations.
//! Each request encodes to a JSON parameter mapping, gets its currency
//! upper-cased, and is validated before the client sends it.

use crate::error::{ValidationError, WioError, WioResult};
use crate::validate::{self, Params};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Wire format for link expiry timestamps
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A request body the gateway accepts
pub trait GatewayRequest: Serialize {
    /// Validate the encoded parameter mapping
    fn validate(params: &Params) -> Result<(), ValidationError>;

    /// Encode into a JSON parameter mapping
    fn to_params(&self) -> WioResult<Params> {
        let value = serde_json::to_value(self)
            .map_err(|e| WioError::Serialization(format!("Failed to encode request: {}", e)))?;
        match value {
            Value::Object(map) => Ok(map),
            other => Err(WioError::Serialization(format!(
                "Request encoded to {} instead of an object",
                other
            ))),
        }
    }

    /// Encode, normalize currency, then validate. Returns the exact body to send.
    fn prepare(&self) -> WioResult<Params> {
        let mut params = self.to_params()?;
        validate::normalize_currency(&mut params);
        Self::validate(&params)?;
        Ok(params)
    }
}

// serde_json writes non-finite floats as null, which would read as a missing
// amount. Send them as text so the amount check rejects them instead.
fn serialize_amount<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.is_finite() {
        serializer.serialize_f64(*amount)
    } else {
        serializer.serialize_str(&amount.to_string())
    }
}

/// Generate a unique order reference (e.g., "ORDER_3f2a...")
pub fn generate_order_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Customer details attached to a payment or session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

/// Body for `POST /api/v1/create-payment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Decimal amount in major units (50.00 = fifty dollars)
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    /// ISO 4217 code, any case
    pub currency: String,
    /// Merchant order reference
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl PaymentRequest {
    pub fn new(amount: f64, currency: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            order_id: order_id.into(),
            description: None,
            customer: None,
            metadata: HashMap::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Builder: set customer
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Builder: add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl GatewayRequest for PaymentRequest {
    fn validate(params: &Params) -> Result<(), ValidationError> {
        validate::validate_payment(params)
    }
}

/// Body for `POST /api/v1/hosted/sessions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedSessionRequest {
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    pub currency: String,
    pub order_id: String,
    /// Where the hosted page sends the customer after paying
    pub success_url: String,
    /// Where the hosted page sends the customer on cancel
    pub cancel_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl HostedSessionRequest {
    pub fn new(
        amount: f64,
        currency: impl Into<String>,
        order_id: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            order_id: order_id.into(),
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
            description: None,
            customer: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl GatewayRequest for HostedSessionRequest {
    fn validate(params: &Params) -> Result<(), ValidationError> {
        validate::validate_hosted_session(params)
    }
}

/// Body for `POST /api/v1/payment-links`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLinkRequest {
    #[serde(serialize_with = "serialize_amount")]
    pub amount: f64,
    pub currency: String,
    pub description: String,
    /// `None` means unlimited uses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    /// UTC timestamp in `EXPIRY_FORMAT`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl PaymentLinkRequest {
    pub fn new(amount: f64, currency: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            description: description.into(),
            max_uses: None,
            expires_at: None,
            success_url: None,
            cancel_url: None,
            metadata: HashMap::new(),
        }
    }

    /// Builder: limit how many times the link can be paid
    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    /// Builder: expire at a fixed instant
    pub fn with_expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at.format(EXPIRY_FORMAT).to_string());
        self
    }

    /// Builder: expire a duration from now
    pub fn expires_in(self, duration: Duration) -> Self {
        self.with_expires_at(Utc::now() + duration)
    }

    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl GatewayRequest for PaymentLinkRequest {
    fn validate(params: &Params) -> Result<(), ValidationError> {
        validate::validate_payment_link(params)
    }
}

/// Query filters for `GET /api/v1/payment-links`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentLinkFilters {
    pairs: Vec<(String, String)>,
}

impl PaymentLinkFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: filter by link status (e.g., "active")
    pub fn status(self, status: impl Into<String>) -> Self {
        self.with("status", status)
    }

    /// Builder: add an arbitrary filter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encoded query string without the leading `?`, or `None` when empty
    pub fn to_query(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        Some(serializer.finish())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PaymentLinkFilters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |filters, (k, v)| filters.with(k, v))
    }
}
