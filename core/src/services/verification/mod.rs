//! Verification service module
//!
//! Complete email verification workflow:
//! - single active code per address, enforced on every path
//! - cryptographically secure 6-digit code generation
//! - lazy expiry checks at verify time (no background sweeper)
//! - one-shot consumption: every terminal verify outcome removes the record
//! - localized notification delivery with a bounded two-level fallback

mod config;
mod service;
mod traits;
mod types;


pub use config::{VerificationConfig, FALLBACK_LOCALE};
pub use service::{is_valid_email, mask_email, VerificationService};
pub use traits::{CodeStore, MessageCatalog, MessageDispatcher};
pub use types::{EmailEnvelope, RequestOutcome, VerifyOutcome};
