//! Configuration for the verification service.

use std::env;

use crate::domain::entities::verification_record::DEFAULT_VALIDITY_SECONDS;

/// Locale used when the requested locale or message key is unavailable
pub const FALLBACK_LOCALE: &str = "en";

/// Sender used when neither `EMAIL_VERIFICATION_SENDER` nor `MAIL_FROM` is set
const DEFAULT_SENDER: &str = "no-reply@localhost";

/// Configuration for the verification service, read once at startup.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Seconds before a newly issued code expires
    pub validity_seconds: i64,
    /// Sender address for outbound notifications
    pub sender: String,
    /// Locale used when the requested one cannot be resolved
    pub fallback_locale: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            validity_seconds: DEFAULT_VALIDITY_SECONDS,
            sender: DEFAULT_SENDER.to_string(),
            fallback_locale: FALLBACK_LOCALE.to_string(),
        }
    }
}

impl VerificationConfig {
    /// Read configuration from the environment.
    ///
    /// * `EMAIL_VERIFICATION_VALIDITY` - validity window in seconds
    ///   (default 600)
    /// * `EMAIL_VERIFICATION_SENDER` - sender address, falling back to the
    ///   globally configured `MAIL_FROM` outbound address
    pub fn from_env() -> Self {
        let validity_seconds = env::var("EMAIL_VERIFICATION_VALIDITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_VALIDITY_SECONDS);

        let sender = env::var("EMAIL_VERIFICATION_SENDER")
            .or_else(|_| env::var("MAIL_FROM"))
            .unwrap_or_else(|_| DEFAULT_SENDER.to_string());

        Self {
            validity_seconds,
            sender,
            fallback_locale: FALLBACK_LOCALE.to_string(),
        }
    }
}
