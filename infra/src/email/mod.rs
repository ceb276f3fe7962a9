//! Outbound email dispatchers.

pub mod mock;
pub mod smtp;

pub use mock::MockDispatcher;
pub use smtp::{SmtpConfig, SmtpDispatcher};
