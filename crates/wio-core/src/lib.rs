//! # wio-core
//!
//! Core types for the WioPayments gateway SDK.
//!
//! This crate provides:
//! - `WioError` and `ValidationError` for typed error handling
//! - `Currency`, the gateway's currency allow-list
//! - Request builders (`PaymentRequest`, `HostedSessionRequest`, `PaymentLinkRequest`)
//! - Validators that run before any request leaves the process
//! - Response models (`Payment`, `PaymentStatus`, `HostedSession`, `PaymentLink`, ...)
//! - The `Transport` trait the gateway client sends requests through
//!
//! ## Example
//!
//! ```rust
//! use wio_core::{Customer, GatewayRequest, PaymentRequest};
//!
//! let request = PaymentRequest::new(50.00, "usd", "ORDER_1")
//!     .with_description("Test Payment")
//!     .with_customer(Customer::new("John Doe", "john@example.com"));
//!
//! // Currency is upper-cased and the body validated before it is sent
//! let body = request.prepare().unwrap();
//! assert_eq!(body["currency"], "USD");
//! ```

pub mod currency;
pub mod error;
pub mod models;
pub mod request;
pub mod transport;
pub mod validate;

// Re-exports for convenience
pub use currency::Currency;
pub use error::{BoxError, ValidationError, WioError, WioResult};
pub use models::{
    HostedSession, HostedSessionStatus, Payment, PaymentLink, PaymentLinkList, PaymentStatus,
};
pub use request::{
    generate_order_id, Customer, GatewayRequest, HostedSessionRequest, PaymentLinkFilters,
    PaymentLinkRequest, PaymentRequest,
};
pub use transport::{BoxedTransport, Method, RequestOptions, Transport};
pub use validate::Params;
