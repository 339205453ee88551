//! Core types for the storepay checkout service.
//!
//! This crate provides the foundational types used throughout storepay:
//!
//! - **Identifiers**: `RecordId`
//! - **Requests**: `PaymentRequest`, `ValidatedPayment`
//! - **Records**: `PaymentRecord`
//!
//! # Amounts
//!
//! Form amounts arrive as decimal strings in major units ("12.50"). They are
//! converted once, at validation time, to integer minor units (cents) and
//! stored as `i64` to avoid floating point precision issues downstream.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod record;
pub mod request;

pub use ids::{IdError, RecordId};
pub use record::PaymentRecord;
pub use request::{PaymentRequest, ValidatedPayment, ValidationError};
