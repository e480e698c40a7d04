//! Application state and router assembly, shared by `main` and the
//! integration tests so the tested surface is the served one.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{auth, projects};
use crate::infrastructure::registry::{Registry, RepositoryFactory, RepositoryId, RequestContext};

/// Repository kinds the route table resolves at request time. The
/// composition root validates these against the registry before serving.
pub const REQUIRED_REPOSITORIES: [RepositoryId; 2] = [RepositoryId::PROJECTS, RepositoryId::USERS];

#[derive(Clone)]
pub struct AppState {
    registry: Arc<Registry>,
    pool: PgPool,
}

impl AppState {
    pub fn new(registry: Arc<Registry>, pool: PgPool) -> Self {
        Self { registry, pool }
    }

    /// Repository factory scoped to the current request.
    pub fn repositories(&self) -> RepositoryFactory<'_> {
        self.registry.factory(RequestContext::new(self.pool.clone()))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(auth::health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .merge(projects::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
