//! # Infrastructure Layer
//!
//! Concrete implementations of the verification core's collaborator traits:
//!
//! - **store**: Redis-backed and in-memory record stores
//! - **email**: SMTP (lettre) and mock message dispatchers
//! - **l10n**: Fluent message catalog loaded from `.ftl` bundles at startup

use thiserror::Error;

/// Outbound email dispatchers
pub mod email;

/// Localization - Fluent message catalog
pub mod l10n;

/// Record store implementations
pub mod store;

/// Errors raised while constructing or operating infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Redis store error
    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Email transport error
    #[error("email error: {0}")]
    Email(String),

    /// Locale resource loading error
    #[error("localization error: {0}")]
    Localization(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
