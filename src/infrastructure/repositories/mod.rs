// Repository implementations (data access layer)
// Adapters that implement the domain repository contracts

pub mod in_memory;
pub mod postgres_project_repository;
pub mod postgres_user_repository;

pub use in_memory::{InMemoryProjectRepository, InMemoryUserRepository};
pub use postgres_project_repository::PostgresProjectRepository;
pub use postgres_user_repository::PostgresUserRepository;
