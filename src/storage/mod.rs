//! Storage implementations.

pub mod schema;
pub mod sql;

pub use sql::SqlPositionStore;

#[cfg(feature = "postgres")]
pub use sql::postgres::PostgresPositionStore;

#[cfg(feature = "sqlite")]
pub use sql::sqlite::SqlitePositionStore;
