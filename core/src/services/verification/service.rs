//! Main verification service implementation.

use std::sync::Arc;

use rand::{rngs::OsRng, Rng};
use tracing;

use crate::domain::entities::verification_record::{VerificationRecord, CODE_MAX, CODE_MIN};
use crate::errors::{VerificationError, VerificationResult};

use super::config::VerificationConfig;
use super::traits::{CodeStore, MessageCatalog, MessageDispatcher};
use super::types::{EmailEnvelope, RequestOutcome, VerifyOutcome};

/// Message key for the localized notification subject
const SUBJECT_KEY: &str = "email-verification-subject";

/// Message key for the localized notification body
const BODY_KEY: &str = "email-verification-body";

/// Orchestrates the verification lifecycle atop a record store, an outbound
/// message dispatcher and a message catalog.
pub struct VerificationService<S: CodeStore, D: MessageDispatcher, C: MessageCatalog> {
    /// Record store, atomic per email key
    store: Arc<S>,
    /// Outbound message transport
    dispatcher: Arc<D>,
    /// Per-locale message bundles, immutable after startup
    catalog: Arc<C>,
    /// Service configuration
    config: VerificationConfig,
}

impl<S: CodeStore, D: MessageDispatcher, C: MessageCatalog> VerificationService<S, D, C> {
    /// Create a new verification service.
    pub fn new(store: Arc<S>, dispatcher: Arc<D>, catalog: Arc<C>, config: VerificationConfig) -> Self {
        Self {
            store,
            dispatcher,
            catalog,
            config,
        }
    }

    /// Issue a new code for `email` and dispatch the localized notification.
    ///
    /// Steps, strictly in order:
    /// 1. Validate the address (non-empty, contains `@`).
    /// 2. Remove any lingering record for the address.
    /// 3. Generate a fresh code and persist the record.
    /// 4. Resolve the localized subject and body for `language` (falling
    ///    back to the configured fallback locale when absent).
    /// 5. Dispatch the message.
    ///
    /// A dispatch failure is surfaced as an error but leaves the record in
    /// place: a later `request` removes it first, and `verify` can still
    /// succeed within the validity window.
    pub async fn request(
        &self,
        email: &str,
        reason: &str,
        language: Option<&str>,
    ) -> VerificationResult<RequestOutcome> {
        if !is_valid_email(email) {
            tracing::warn!(
                email = %mask_email(email),
                event = "invalid_email",
                "Rejected verification request for malformed address"
            );
            return Err(VerificationError::InvalidEmail {
                email: email.to_string(),
            });
        }

        // Single-active-code invariant: clear anything lingering first
        self.store.remove(email).await.map_err(|e| {
            tracing::error!(
                email = %mask_email(email),
                error = %e,
                event = "store_remove_failed",
                "Failed to clear previous verification record"
            );
            VerificationError::Store { message: e }
        })?;

        let code = Self::generate_code();
        let record = VerificationRecord::new(email, code, self.config.validity_seconds);

        self.store.put(&record).await.map_err(|e| {
            tracing::error!(
                email = %mask_email(email),
                error = %e,
                event = "store_put_failed",
                "Failed to persist verification record"
            );
            VerificationError::Store { message: e }
        })?;

        tracing::info!(
            email = %mask_email(email),
            expiry = %record.expiry,
            event = "code_issued",
            "Stored new verification record"
        );

        let locale = language.unwrap_or(&self.config.fallback_locale);
        let args = [
            ("email", email.to_string()),
            ("reason", reason.to_string()),
            ("code", code.to_string()),
        ];
        let subject = self.localize(locale, SUBJECT_KEY, &args);
        let body = self.localize(locale, BODY_KEY, &args);

        let envelope = EmailEnvelope {
            to: email.to_string(),
            from: self.config.sender.clone(),
        };

        let message_id = self
            .dispatcher
            .send(&subject, &body, &envelope)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "dispatch_failed",
                    "Failed to send verification message"
                );
                VerificationError::Dispatch { message: e }
            })?;

        tracing::info!(
            email = %mask_email(email),
            message_id = %message_id,
            event = "code_dispatched",
            "Verification message sent"
        );

        Ok(RequestOutcome {
            code,
            expiry: record.expiry,
            message_id,
        })
    }

    /// Check a submitted code against the stored record.
    ///
    /// Verify is always consuming: every terminal outcome except
    /// [`VerifyOutcome::StoreError`] removes the record, so a second call
    /// for the same address yields `NotFound`. Soft outcomes are returned,
    /// never raised.
    pub async fn verify(&self, email: &str, submitted: &str) -> VerifyOutcome {
        let record = match self.store.get(email).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(
                    email = %mask_email(email),
                    event = "verify_not_found",
                    "No verification record for address"
                );
                return VerifyOutcome::NotFound;
            }
            Err(e) => {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "verify_store_error",
                    "Store lookup failed during verification"
                );
                // Record state unknown; do not attempt removal
                return VerifyOutcome::StoreError;
            }
        };

        if record.is_expired() {
            return self.consume(email, VerifyOutcome::Expired).await;
        }

        if !record.matches(submitted) {
            return self.consume(email, VerifyOutcome::Mismatch).await;
        }

        self.consume(email, VerifyOutcome::Valid).await
    }

    /// Remove the record and settle on `outcome`. A failing removal
    /// degrades to `StoreError`, keeping failure modes indistinguishable to
    /// the end user.
    async fn consume(&self, email: &str, outcome: VerifyOutcome) -> VerifyOutcome {
        match self.store.remove(email).await {
            Ok(()) => {
                tracing::info!(
                    email = %mask_email(email),
                    outcome = ?outcome,
                    event = "verify_settled",
                    "Verification record consumed"
                );
                outcome
            }
            Err(e) => {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "verify_store_error",
                    "Failed to consume verification record"
                );
                VerifyOutcome::StoreError
            }
        }
    }

    /// Generate a 6-digit code, uniform over `[100_000, 1_000_000)`, from
    /// the OS CSPRNG.
    ///
    /// The short code resists guessing only because the source is
    /// unpredictable and the validity window is bounded; a general-purpose
    /// PRNG would not do here.
    pub fn generate_code() -> u32 {
        let mut rng = OsRng;
        rng.gen_range(CODE_MIN..CODE_MAX)
    }

    /// Resolve a message for `locale`, falling back once to the configured
    /// fallback locale, then to an empty string.
    ///
    /// The chain is a bounded two-level lookup, never recursive. A missing
    /// translation degrades to empty content instead of blocking delivery.
    pub fn localize(&self, locale: &str, key: &str, args: &[(&str, String)]) -> String {
        if let Some(text) = self.catalog.resolve(locale, key, args) {
            return text;
        }
        if locale != self.config.fallback_locale {
            if let Some(text) = self.catalog.resolve(&self.config.fallback_locale, key, args) {
                return text;
            }
        }
        tracing::warn!(
            locale = locale,
            key = key,
            event = "message_unresolved",
            "No translation in requested or fallback locale"
        );
        String::new()
    }
}

/// Minimal email shape check: non-empty and contains `@`.
///
/// Deliberately not RFC-compliant; the delivered message is authoritative
/// proof of mailbox ownership.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

/// Mask an address for logs, keeping the first local character and the
/// domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let head = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", head, domain)
        }
        None => "***".to_string(),
    }
}
