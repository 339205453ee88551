//! Storepay HTTP API Service.
//!
//! This crate provides the HTTP API for the storepay checkout flow:
//!
//! - Payment intent creation (embedded card form path)
//! - Hosted checkout session creation
//! - Stripe webhook recording
//! - Result pages and payment listing

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Page handlers need async for routing consistency

pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{Processor, StripeClient, StripeError};
