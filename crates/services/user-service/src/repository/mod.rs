//! Repository layer for data access.
//!
//! `UserRepository` is the storage contract; `InMemoryUserRepository` and
//! `PostgresUserRepository` are its backends and `create_repository`
//! chooses between them from configuration.

pub mod entities;
mod factory;
mod in_memory;
mod postgres;
mod user_repository;

pub use factory::{create_repository, RepositoryKind};
pub use in_memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
