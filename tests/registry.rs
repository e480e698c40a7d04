//! Registry contract tests
//!
//! Covers the composition-root behavior: fresh construction per resolve,
//! last-registration-wins replacement, fatal resolution of unknown
//! identifiers, and the startup validation pass.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use projects_api::infrastructure::registry::{RegistryBuilder, RepositoryId, RequestContext};

fn test_context() -> RequestContext {
    // connect_lazy never opens a connection; nothing here touches it.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgresql://localhost/unused")
        .expect("lazy pool");

    RequestContext::new(pool)
}

#[derive(Debug, PartialEq)]
struct Probe {
    generation: usize,
}

#[tokio::test]
async fn resolve_invokes_the_builder_each_time() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let registry = RegistryBuilder::new()
        .register(RepositoryId::PROJECTS, move |_ctx| Probe {
            generation: counter.fetch_add(1, Ordering::SeqCst) + 1,
        })
        .build();

    let ctx = test_context();
    let first: Probe = registry.resolve(RepositoryId::PROJECTS, &ctx);
    let second: Probe = registry.resolve(RepositoryId::PROJECTS, &ctx);

    // No caching: each resolve is a fresh construction.
    assert_eq!(first.generation, 1);
    assert_eq!(second.generation, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn re_registration_replaces_the_builder() {
    let registry = RegistryBuilder::new()
        .register(RepositoryId::PROJECTS, |_ctx| "first".to_string())
        .register(RepositoryId::PROJECTS, |_ctx| "second".to_string())
        .build();

    let resolved: String = registry.resolve(RepositoryId::PROJECTS, &test_context());
    assert_eq!(resolved, "second");
}

#[tokio::test]
#[should_panic(expected = "is not configured")]
async fn resolving_an_unregistered_id_panics() {
    let registry = RegistryBuilder::new().build();
    let _: Probe = registry.resolve(RepositoryId::PROJECTS, &test_context());
}

#[tokio::test]
#[should_panic(expected = "does not build the requested type")]
async fn resolving_the_wrong_type_panics() {
    let registry = RegistryBuilder::new()
        .register(RepositoryId::PROJECTS, |_ctx| "a string".to_string())
        .build();

    let _: Probe = registry.resolve(RepositoryId::PROJECTS, &test_context());
}

#[tokio::test]
async fn ensure_registered_names_the_missing_id() {
    let registry = RegistryBuilder::new()
        .register(RepositoryId::PROJECTS, |_ctx| Probe { generation: 0 })
        .build();

    assert!(registry
        .ensure_registered([RepositoryId::PROJECTS])
        .is_ok());

    let err = registry
        .ensure_registered([RepositoryId::PROJECTS, RepositoryId::USERS])
        .expect_err("users is not registered");
    assert!(err.to_string().contains("users"));
}

#[tokio::test]
async fn factory_closes_over_the_context() {
    let registry = RegistryBuilder::new()
        .register(RepositoryId::PROJECTS, |_ctx| Probe { generation: 42 })
        .build();

    let factory = registry.factory(test_context());
    let probe = factory.resolve::<Probe>(RepositoryId::PROJECTS);

    assert_eq!(probe, Probe { generation: 42 });
}

#[tokio::test]
async fn custom_ids_are_first_class() {
    let id = RepositoryId::new("audit-log");
    let registry = RegistryBuilder::new()
        .register(id, |_ctx| 7_usize)
        .build();

    let resolved: usize = registry.resolve(id, &test_context());
    assert_eq!(resolved, 7);
}
