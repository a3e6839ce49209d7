//! # Response Models
//!
//! Typed views over gateway responses. Mapping never fails: a field the
//! server leaves out (or sends with an unexpected type) is `None`.
//! Session and link types also keep the full raw object, since the server
//! owns their schema.

use crate::validate::numeric_value;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn str_field(obj: &Value, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn num_field(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(numeric_value)
}

fn u64_field(obj: &Value, key: &str) -> Option<u64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn raw_object(obj: &Value) -> Map<String, Value> {
    obj.as_object().cloned().unwrap_or_default()
}

/// A payment created by `POST /api/v1/create-payment`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub order_id: Option<String>,
    /// Token the card widget needs to confirm the charge
    pub client_secret: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub created_at: Option<String>,
}

impl Payment {
    pub fn from_value(raw: &Value) -> Self {
        let customer = raw.get("customer").unwrap_or(&Value::Null);
        Self {
            id: str_field(raw, "id"),
            amount: num_field(raw, "amount"),
            currency: str_field(raw, "currency"),
            status: str_field(raw, "status"),
            order_id: str_field(raw, "order_id"),
            client_secret: str_field(raw, "client_secret"),
            customer_name: str_field(customer, "name"),
            customer_email: str_field(customer, "email"),
            created_at: str_field(raw, "created_at"),
        }
    }
}

/// Point-in-time status from `GET /api/v1/payment/{id}/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub id: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub order_id: Option<String>,
    pub updated_at: Option<String>,
}

impl PaymentStatus {
    pub fn from_value(raw: &Value) -> Self {
        Self {
            id: str_field(raw, "id"),
            status: str_field(raw, "status"),
            amount: num_field(raw, "amount"),
            currency: str_field(raw, "currency"),
            order_id: str_field(raw, "order_id"),
            updated_at: str_field(raw, "updated_at"),
        }
    }
}

/// Hosted payment session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostedSession {
    pub session_id: Option<String>,
    /// Gateway page to redirect the customer to
    pub payment_url: Option<String>,
    pub expires_at: Option<String>,
    pub raw: Map<String, Value>,
}

impl HostedSession {
    pub fn from_value(raw: &Value) -> Self {
        Self {
            session_id: str_field(raw, "session_id"),
            payment_url: str_field(raw, "payment_url"),
            expires_at: str_field(raw, "expires_at"),
            raw: raw_object(raw),
        }
    }

    /// Any field of the server response
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }
}

/// Status of a hosted session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostedSessionStatus {
    pub session_id: Option<String>,
    pub status: Option<String>,
    pub payment_id: Option<String>,
    pub raw: Map<String, Value>,
}

impl HostedSessionStatus {
    pub fn from_value(raw: &Value) -> Self {
        Self {
            session_id: str_field(raw, "session_id"),
            status: str_field(raw, "status"),
            payment_id: str_field(raw, "payment_id"),
            raw: raw_object(raw),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }
}

/// A shareable payment link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentLink {
    pub id: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    /// `None` when the link has no use limit
    pub max_uses: Option<u64>,
    pub used_count: Option<u64>,
    pub expires_at: Option<String>,
    pub created_at: Option<String>,
    pub raw: Map<String, Value>,
}

impl PaymentLink {
    pub fn from_value(raw: &Value) -> Self {
        Self {
            id: str_field(raw, "id"),
            url: str_field(raw, "url"),
            status: str_field(raw, "status"),
            description: str_field(raw, "description"),
            amount: num_field(raw, "amount"),
            currency: str_field(raw, "currency"),
            max_uses: u64_field(raw, "max_uses"),
            used_count: u64_field(raw, "used_count"),
            expires_at: str_field(raw, "expires_at"),
            created_at: str_field(raw, "created_at"),
            raw: raw_object(raw),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// True while the link still accepts payments, as far as the counters tell
    pub fn has_uses_left(&self) -> bool {
        match (self.max_uses, self.used_count) {
            (Some(max), Some(used)) => used < max,
            _ => true,
        }
    }
}

/// Response of `GET /api/v1/payment-links`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentLinkList {
    pub data: Vec<PaymentLink>,
    /// Untouched response body, including `data` and any paging fields
    pub raw: Map<String, Value>,
}

impl PaymentLinkList {
    pub fn from_value(raw: &Value) -> Self {
        let data = raw
            .get("data")
            .and_then(Value::as_array)
            .map(|links| links.iter().map(PaymentLink::from_value).collect())
            .unwrap_or_default();
        Self {
            data,
            raw: raw_object(raw),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaymentLink> {
        self.data.iter()
    }
}
