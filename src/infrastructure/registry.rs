//! Repository registry
//!
//! A table built once at startup mapping a [`RepositoryId`] to a constructor
//! that, given the current request's context, produces a fresh repository
//! instance. The builder/freeze split makes the single-writer-then-read-only
//! discipline explicit: [`RegistryBuilder`] is the only writer, and the
//! [`Registry`] it produces is immutable for the lifetime of the process.
//!
//! An identifier that is resolved without having been registered is a
//! deployment defect, not bad input, so [`Registry::resolve`] panics rather
//! than returning a recoverable error. [`Registry::ensure_registered`] lets
//! the composition root turn that panic-on-first-use into a boot-time check.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use sqlx::PgPool;
use thiserror::Error;

use crate::domain::repositories::{ProjectRepository, UserRepository};

/// Opaque token identifying a repository kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepositoryId(&'static str);

impl RepositoryId {
    pub const PROJECTS: Self = Self("projects");
    pub const USERS: Self = Self("users");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Startup-time registry validation failure.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no repository builder registered for `{0}`")]
    Missing(RepositoryId),
}

/// Per-request input handed to repository constructors.
///
/// Carries the database handle; cloning a pool is cheap and scopes any
/// connection checked out by the repository to the request that resolved it.
#[derive(Clone)]
pub struct RequestContext {
    pool: PgPool,
}

impl RequestContext {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

type BoxedBuilder = Box<dyn Fn(&RequestContext) -> Box<dyn Any> + Send + Sync>;

/// Write side of the registry. Registration runs single-threaded during
/// bootstrap, before the listener starts; last registration wins.
#[derive(Default)]
pub struct RegistryBuilder {
    builders: HashMap<RepositoryId, BoxedBuilder>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or overwrite) the constructor for `id`.
    pub fn register<R, F>(mut self, id: RepositoryId, builder: F) -> Self
    where
        R: Any,
        F: Fn(&RequestContext) -> R + Send + Sync + 'static,
    {
        let boxed: BoxedBuilder = Box::new(move |ctx| Box::new(builder(ctx)));
        self.builders.insert(id, boxed);
        self
    }

    /// Freeze the table.
    pub fn build(self) -> Registry {
        Registry {
            builders: self.builders,
        }
    }
}

/// Read side of the registry: an immutable constructor table.
pub struct Registry {
    builders: HashMap<RepositoryId, BoxedBuilder>,
}

impl Registry {
    /// Invoke the constructor registered for `id` with the request context.
    ///
    /// Construction happens on every call; nothing is cached.
    ///
    /// # Panics
    /// When `id` was never registered, or the registered constructor builds
    /// a type other than `R`. Both indicate a broken composition root.
    pub fn resolve<R: Any>(&self, id: RepositoryId, ctx: &RequestContext) -> R {
        let Some(builder) = self.builders.get(&id) else {
            panic!("repository for id `{id}` is not configured");
        };

        match builder(ctx).downcast::<R>() {
            Ok(repository) => *repository,
            Err(_) => panic!("repository for id `{id}` does not build the requested type"),
        }
    }

    /// Check that every identifier the routes will resolve has a builder.
    ///
    /// Run by the composition root before the listener binds, so a missing
    /// registration surfaces as a startup failure instead of a panic on the
    /// first request that needs it.
    pub fn ensure_registered(
        &self,
        ids: impl IntoIterator<Item = RepositoryId>,
    ) -> Result<(), RegistryError> {
        for id in ids {
            if !self.builders.contains_key(&id) {
                return Err(RegistryError::Missing(id));
            }
        }
        Ok(())
    }

    /// Per-request facade over this registry.
    pub fn factory(&self, ctx: RequestContext) -> RepositoryFactory<'_> {
        RepositoryFactory {
            registry: self,
            ctx,
        }
    }
}

/// Thin per-request facade closing over the registry and the request
/// context, so call sites resolve repositories without threading both.
pub struct RepositoryFactory<'a> {
    registry: &'a Registry,
    ctx: RequestContext,
}

impl RepositoryFactory<'_> {
    pub fn resolve<R: Any>(&self, id: RepositoryId) -> R {
        self.registry.resolve(id, &self.ctx)
    }

    pub fn projects(&self) -> Box<dyn ProjectRepository> {
        self.resolve(RepositoryId::PROJECTS)
    }

    pub fn users(&self) -> Box<dyn UserRepository> {
        self.resolve(RepositoryId::USERS)
    }
}
