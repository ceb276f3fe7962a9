//! Result types for the verification service.

use chrono::{DateTime, Utc};

/// Recipient and sender of an outbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailEnvelope {
    /// Recipient address
    pub to: String,
    /// Sender address
    pub from: String,
}

/// Result of a successful code request.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    /// The generated code, for the caller's own logging/audit. It reaches
    /// the end user only through the delivered message.
    pub code: u32,
    /// When the code stops being valid
    pub expiry: DateTime<Utc>,
    /// Message id reported by the dispatcher
    pub message_id: String,
}

/// Terminal outcome of a verify attempt.
///
/// Every variant except `StoreError` consumes the stored record, so a second
/// verify call for the same address yields `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Code matched within the validity window
    Valid,
    /// The validity window had elapsed
    Expired,
    /// Submitted code did not match (or was not numeric)
    Mismatch,
    /// No record exists for the address
    NotFound,
    /// The store failed unexpectedly; record state unknown
    StoreError,
}

impl VerifyOutcome {
    /// True only for a successful verification.
    pub fn is_valid(&self) -> bool {
        matches!(self, VerifyOutcome::Valid)
    }
}
