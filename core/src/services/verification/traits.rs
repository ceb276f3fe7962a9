//! Collaborator traits the verification service is generic over.
//!
//! Traits return `Result<_, String>` at the seam; the service maps failures
//! into its own error domain.

use async_trait::async_trait;

use crate::domain::entities::verification_record::VerificationRecord;

use super::types::EmailEnvelope;

/// Keyed storage of at most one verification record per email address.
///
/// The only concurrency guarantee implementations must provide is an atomic
/// per-key upsert; the service never requires serialization across calls.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Upsert by email key. Overwriting an existing record is not an error.
    async fn put(&self, record: &VerificationRecord) -> Result<(), String>;

    /// Fetch the record for an email; absence is `Ok(None)`, not an error.
    async fn get(&self, email: &str) -> Result<Option<VerificationRecord>, String>;

    /// Delete the record for an email. Removing a missing record is a no-op.
    async fn remove(&self, email: &str) -> Result<(), String>;
}

/// Outbound message transport.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Send a fully resolved message, returning the provider message id.
    async fn send(
        &self,
        subject: &str,
        body: &str,
        envelope: &EmailEnvelope,
    ) -> Result<String, String>;
}

/// Per-locale message bundle lookup and pattern formatting.
///
/// Implementations resolve exactly one locale and format the pattern with
/// the given arguments; the fallback policy lives in the service.
pub trait MessageCatalog: Send + Sync {
    /// Resolve `key` in `locale`, or `None` when the bundle or message is
    /// unavailable.
    fn resolve(&self, locale: &str, key: &str, args: &[(&str, String)]) -> Option<String>;
}
