//! Full verification flow wired through the real infrastructure pieces:
//! in-memory store, Fluent catalog loaded from the shipped locale files and
//! the mock dispatcher.

use std::sync::Arc;

use ev_core::services::verification::{
    VerificationConfig, VerificationService, VerifyOutcome,
};
use ev_infra::email::MockDispatcher;
use ev_infra::l10n::FluentCatalog;
use ev_infra::store::InMemoryCodeStore;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

fn locale_dir() -> String {
    format!("{}/../locales", env!("CARGO_MANIFEST_DIR"))
}

fn build_service(
    store: Arc<InMemoryCodeStore>,
    config: VerificationConfig,
) -> VerificationService<InMemoryCodeStore, MockDispatcher, FluentCatalog> {
    let catalog = FluentCatalog::load_dir(locale_dir()).expect("locale bundles should load");
    VerificationService::new(store, Arc::new(MockDispatcher::new()), Arc::new(catalog), config)
}

#[tokio::test]
async fn test_french_request_then_verify() {
    init_tracing();
    let store = Arc::new(InMemoryCodeStore::new());
    let service = build_service(store.clone(), VerificationConfig::default());

    let outcome = service
        .request("a@b.com", "signup", Some("fr"))
        .await
        .unwrap();
    assert!(outcome.code >= 100_000 && outcome.code <= 999_999);
    assert_eq!(store.len().await, 1);

    let result = service.verify("a@b.com", &outcome.code.to_string()).await;
    assert_eq!(result, VerifyOutcome::Valid);
    assert!(store.is_empty().await);

    let again = service.verify("a@b.com", &outcome.code.to_string()).await;
    assert_eq!(again, VerifyOutcome::NotFound);
}

#[tokio::test]
async fn test_shipped_bundles_resolve_both_messages() {
    init_tracing();
    let service = build_service(
        Arc::new(InMemoryCodeStore::new()),
        VerificationConfig::default(),
    );

    let args = [
        ("email", "a@b.com".to_string()),
        ("reason", "signup".to_string()),
        ("code", "482913".to_string()),
    ];

    let subject = service.localize("fr", "email-verification-subject", &args);
    assert_eq!(subject, "Votre code de vérification");

    let body = service.localize("fr", "email-verification-body", &args);
    assert!(body.contains("482913"));
    assert!(body.contains("a@b.com"));
    assert!(body.contains("signup"));

    // Unknown locale falls back to English
    let subject = service.localize("xx", "email-verification-subject", &args);
    assert_eq!(subject, "Your verification code");

    // Missing everywhere degrades to empty content, never an error
    let missing = service.localize("fr", "no-such-message", &args);
    assert_eq!(missing, "");
}

#[tokio::test]
async fn test_expired_code_via_zero_validity_window() {
    init_tracing();
    let store = Arc::new(InMemoryCodeStore::new());
    let config = VerificationConfig {
        validity_seconds: 0,
        ..VerificationConfig::default()
    };
    let service = build_service(store.clone(), config);

    let outcome = service.request("a@b.com", "signup", None).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let result = service.verify("a@b.com", &outcome.code.to_string()).await;
    assert_eq!(result, VerifyOutcome::Expired);
    assert!(store.is_empty().await);
}
