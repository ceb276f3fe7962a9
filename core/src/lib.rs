//! # Email Verification Core
//!
//! Core business logic for issuing and validating short-lived, single-use
//! numeric verification codes bound to an email address. This crate contains
//! the domain entity, the verification service and the collaborator traits
//! (record store, message dispatcher, message catalog) that infrastructure
//! implementations plug into.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
