//! Verification record entity: the single pending code for an email address.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lower bound of the 6-digit code range (inclusive)
pub const CODE_MIN: u32 = 100_000;

/// Upper bound of the 6-digit code range (exclusive)
pub const CODE_MAX: u32 = 1_000_000;

/// Default validity window for a code, in seconds (10 minutes)
pub const DEFAULT_VALIDITY_SECONDS: i64 = 600;

/// The stored `(email, code, expiry)` tuple representing one pending
/// verification attempt.
///
/// At most one record exists per email address at any time; the service
/// enforces this by removing any prior record before creating a new one and
/// by removing the record on every terminal verify outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Email address the code was issued for (unique key)
    pub email: String,

    /// The 6-digit verification code
    pub code: u32,

    /// Timestamp past which the code must be treated as absent
    pub expiry: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a record for `email` expiring `validity_seconds` from now.
    pub fn new(email: impl Into<String>, code: u32, validity_seconds: i64) -> Self {
        Self {
            email: email.into(),
            code,
            expiry: Utc::now() + Duration::seconds(validity_seconds),
        }
    }

    /// Checks whether the validity window has elapsed.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expiry
    }

    /// Compares a submitted code against the stored one.
    ///
    /// Submitted codes arrive as strings from the outside world; anything
    /// that does not parse as an integer fails the match rather than raising
    /// an error.
    pub fn matches(&self, submitted: &str) -> bool {
        submitted
            .trim()
            .parse::<u32>()
            .map(|n| n == self.code)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_expiry() {
        let record = VerificationRecord::new("a@b.com", 123_456, 600);

        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.code, 123_456);
        assert!(!record.is_expired());

        let remaining = record.expiry - Utc::now();
        assert!(remaining <= Duration::seconds(600));
        assert!(remaining > Duration::seconds(590));
    }

    #[test]
    fn test_expired_record() {
        let record = VerificationRecord::new("a@b.com", 123_456, -1);
        assert!(record.is_expired());
    }

    #[test]
    fn test_matches_numeric_input() {
        let record = VerificationRecord::new("a@b.com", 482_913, 600);

        assert!(record.matches("482913"));
        assert!(record.matches(" 482913 "));
        assert!(!record.matches("482914"));
        assert!(!record.matches("000000"));
    }

    #[test]
    fn test_non_numeric_input_fails_match() {
        let record = VerificationRecord::new("a@b.com", 482_913, 600);

        assert!(!record.matches("abcdef"));
        assert!(!record.matches("4829a3"));
        assert!(!record.matches(""));
        assert!(!record.matches("-482913"));
    }
}
