//! Fluent-based message catalog.
//!
//! Loads every `.ftl` bundle from the locale directory once at startup and
//! serves single-locale lookups. The fallback policy stays in the core
//! service; this catalog answers for exactly the locale it is asked about.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

use ev_core::services::verification::MessageCatalog;

use crate::InfrastructureError;

/// Locale resource directory configuration.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Directory containing the `*.ftl` bundles
    pub dir: PathBuf,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("locales"),
        }
    }
}

impl LocaleConfig {
    /// `LOCALE_DIR` environment variable, default `locales`.
    pub fn from_env() -> Self {
        std::env::var("LOCALE_DIR")
            .map(|dir| Self {
                dir: PathBuf::from(dir),
            })
            .unwrap_or_default()
    }
}

/// Immutable per-locale bundle map; construct once at startup and share by
/// `Arc`.
pub struct FluentCatalog {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

// `FluentBundle` has no `Debug` impl, so list only the loaded locales.
impl std::fmt::Debug for FluentCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FluentCatalog")
            .field("locales", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FluentCatalog {
    /// Load every `*.ftl` file under `dir`; the file stem is the locale code.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, InfrastructureError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| {
            InfrastructureError::Localization(format!(
                "cannot read locale dir {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut sources = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| InfrastructureError::Localization(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("ftl") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path).map_err(|e| {
                InfrastructureError::Localization(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                ))
            })?;
            sources.push((locale.to_string(), source));
        }

        Self::from_sources(sources)
    }

    /// Build a catalog from in-memory `(locale, ftl source)` pairs.
    pub fn from_sources(
        sources: Vec<(String, String)>,
    ) -> Result<Self, InfrastructureError> {
        let mut bundles = HashMap::new();

        for (locale, source) in sources {
            let langid: LanguageIdentifier = locale.parse().map_err(|e| {
                InfrastructureError::Localization(format!("invalid locale {}: {:?}", locale, e))
            })?;

            // Keep the valid entries of a partially broken file rather than
            // failing startup over one bad message
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    warn!(
                        locale = %locale,
                        ?errors,
                        "Locale file has syntax errors; keeping valid entries"
                    );
                    resource
                }
            };

            let mut bundle = FluentBundle::new_concurrent(vec![langid]);
            // Plain-text email output; skip Unicode isolation marks
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                warn!(locale = %locale, ?errors, "Overlapping messages in locale bundle");
            }

            debug!(locale = %locale, "Loaded locale bundle");
            bundles.insert(locale, bundle);
        }

        Ok(Self { bundles })
    }

    /// Locales available in this catalog.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }
}

impl MessageCatalog for FluentCatalog {
    fn resolve(&self, locale: &str, key: &str, args: &[(&str, String)]) -> Option<String> {
        let bundle = self.bundles.get(locale)?;
        let message = bundle.get_message(key)?;
        let pattern = message.value()?;

        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.as_str());
        }

        let mut errors = Vec::new();
        let text = bundle.format_pattern(pattern, Some(&fluent_args), &mut errors);
        if !errors.is_empty() {
            warn!(
                locale = locale,
                key = key,
                ?errors,
                "Formatting errors while resolving message"
            );
        }

        Some(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FluentCatalog {
        FluentCatalog::from_sources(vec![
            (
                "en".to_string(),
                "greeting = Hello { $email }, your code is { $code }.\n".to_string(),
            ),
            (
                "fr".to_string(),
                "greeting = Bonjour { $email }, votre code est { $code }.\n".to_string(),
            ),
        ])
        .unwrap()
    }

    fn args() -> Vec<(&'static str, String)> {
        vec![
            ("email", "a@b.com".to_string()),
            ("code", "482913".to_string()),
        ]
    }

    #[test]
    fn test_resolves_and_formats_arguments() {
        let text = catalog().resolve("en", "greeting", &args()).unwrap();
        assert_eq!(text, "Hello a@b.com, your code is 482913.");
    }

    #[test]
    fn test_resolves_per_locale() {
        let text = catalog().resolve("fr", "greeting", &args()).unwrap();
        assert_eq!(text, "Bonjour a@b.com, votre code est 482913.");
    }

    #[test]
    fn test_unknown_locale_is_none() {
        assert!(catalog().resolve("de", "greeting", &args()).is_none());
    }

    #[test]
    fn test_missing_key_is_none() {
        assert!(catalog().resolve("en", "missing", &args()).is_none());
    }

    #[test]
    fn test_syntax_errors_do_not_drop_valid_messages() {
        let catalog = FluentCatalog::from_sources(vec![(
            "en".to_string(),
            "=== not fluent ===\nok-message = Still here\n".to_string(),
        )])
        .unwrap();

        assert_eq!(
            catalog.resolve("en", "ok-message", &[]).unwrap(),
            "Still here"
        );
    }

    #[test]
    fn test_invalid_locale_identifier_is_rejected() {
        let result =
            FluentCatalog::from_sources(vec![("!!".to_string(), "k = v\n".to_string())]);
        assert!(matches!(
            result.unwrap_err(),
            InfrastructureError::Localization(_)
        ));
    }
}
