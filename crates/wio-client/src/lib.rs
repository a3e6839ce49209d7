//! # wio-client
//!
//! HTTP client for the WioPayments gateway.
//!
//! Operations:
//!
//! | Method | HTTP |
//! |--------|------|
//! | `create_payment` | `POST /api/v1/create-payment` |
//! | `get_payment_status` | `GET /api/v1/payment/{id}/status` |
//! | `create_hosted_session` | `POST /api/v1/hosted/sessions` |
//! | `get_hosted_session_status` | `GET /api/v1/hosted/sessions/{id}/status` |
//! | `create_payment_link` | `POST /api/v1/payment-links` |
//! | `get_payment_link` | `GET /api/v1/payment-links/{id}` |
//! | `list_payment_links` | `GET /api/v1/payment-links?{filters}` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wio_client::{WioConfig, WioPayments};
//! use wio_core::{Customer, PaymentRequest};
//!
//! let client = WioPayments::new(WioConfig::new("wio_..."))?;
//!
//! let payment = client
//!     .create_payment(
//!         &PaymentRequest::new(50.00, "USD", "ORDER_1")
//!             .with_customer(Customer::new("John Doe", "john@example.com")),
//!     )
//!     .await?;
//!
//! // Hand payment.client_secret to the card widget, then later:
//! let status = client.get_payment_status(payment.id.as_deref().unwrap_or_default()).await?;
//! ```

pub mod client;
pub mod config;
pub mod transport;

// Re-exports
pub use client::WioPayments;
pub use config::{WioConfig, DEFAULT_BASE_URL};
pub use transport::{parse_response, HttpTransport, USER_AGENT};
