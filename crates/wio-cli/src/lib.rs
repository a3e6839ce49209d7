//! # wio-cli
//!
//! Command-line driver for the WioPayments SDK.
//!
//! ## Commands
//!
//! | Command | Gateway call |
//! |---------|--------------|
//! | `create-payment` | `POST /api/v1/create-payment` |
//! | `payment-status` | `GET /api/v1/payment/{id}/status` |
//! | `session-status` | `GET /api/v1/hosted/sessions/{id}/status` |
//! | `create-link` | `POST /api/v1/payment-links` |
//! | `link` | `GET /api/v1/payment-links/{id}` |
//! | `links` | `GET /api/v1/payment-links?{filters}` |

pub mod command;

pub use command::{Command, USAGE};
