//! # Application Layer
//!
//! Use cases that orchestrate domain services and infrastructure ports.
//!
//! - [`error`]: [`QuoteError`](error::QuoteError) and the user-facing
//!   [`QuoteFailure`](error::QuoteFailure)
//! - [`use_cases`]: [`QuoteShipmentUseCase`](use_cases::QuoteShipmentUseCase)

pub mod error;
pub mod use_cases;

pub use error::{QuoteError, QuoteFailure, QuoteResult};
