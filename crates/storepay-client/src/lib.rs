//! Storepay Client SDK.
//!
//! This crate provides two things for checkout front ends:
//!
//! - [`StorepayClient`], a typed HTTP client for the service's initiation
//!   endpoints (`create-payment-intent`, `create-checkout`).
//! - The embedded card-collection flow: [`CardFormState`], an explicit
//!   immutable form state replaced on each widget event, and
//!   [`CardCheckout`], which drives the guarded three-step submission
//!   (validate, tokenize, confirm) against a [`CardElements`] handle.
//!
//! # Example
//!
//! ```no_run
//! use storepay_client::StorepayClient;
//!
//! # async fn example() -> Result<(), storepay_client::ClientError> {
//! let client = StorepayClient::new("http://localhost:8080");
//!
//! let intent = client
//!     .create_payment_intent("Alice", "12.50", Some("alice@example.com"))
//!     .await?;
//!
//! println!("confirm with secret {}", intent.client_secret);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod card;
mod checkout;
mod client;
mod error;
mod types;

pub use card::{CardBrand, CardField, CardFormState, FieldChange};
pub use checkout::{
    BillingDetails, CardCheckout, CardElements, CardError, ConfirmOutcome, SubmitOutcome,
};
pub use client::StorepayClient;
pub use error::ClientError;
pub use types::*;
