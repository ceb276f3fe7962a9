//! Localization - Fluent message catalog.

pub mod fluent_catalog;

pub use fluent_catalog::{FluentCatalog, LocaleConfig};
