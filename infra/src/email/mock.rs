//! Mock dispatcher that logs messages instead of sending them.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use ev_core::services::verification::{mask_email, EmailEnvelope, MessageDispatcher};

/// Logs every message via tracing and hands back a synthetic message id.
/// For development environments without an SMTP relay.
#[derive(Default)]
pub struct MockDispatcher {
    counter: AtomicU64,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageDispatcher for MockDispatcher {
    async fn send(
        &self,
        subject: &str,
        body: &str,
        envelope: &EmailEnvelope,
    ) -> Result<String, String> {
        let id = self.counter.fetch_add(1, Ordering::Relaxed) + 1;

        info!(
            to = %mask_email(&envelope.to),
            from = %envelope.from,
            subject = subject,
            event = "mock_email",
            "[MOCK EMAIL] message not actually sent"
        );
        info!(body = body, "[MOCK EMAIL] body");

        Ok(format!("mock-{}", id))
    }
}
