//! PostgreSQL connection management shared by the binaries.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "reset-worker").await?;
//! ```

pub mod common;
pub mod postgres;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
