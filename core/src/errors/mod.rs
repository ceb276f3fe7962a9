//! Error types for the verification domain.
//!
//! Only the request flow has fatal errors. Verify results are soft outcomes
//! returned as [`crate::services::verification::VerifyOutcome`], never
//! raised.

use thiserror::Error;

/// Fatal errors surfaced by the request flow.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// Malformed email address, rejected before any side effect
    #[error("invalid email address: {email}")]
    InvalidEmail { email: String },

    /// Underlying record store unavailable or failing
    #[error("store failure: {message}")]
    Store { message: String },

    /// The notification could not be sent; the record remains stored
    #[error("dispatch failure: {message}")]
    Dispatch { message: String },
}

pub type VerificationResult<T> = Result<T, VerificationError>;
