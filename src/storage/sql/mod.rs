//! Unified SQL storage implementations.
//!
//! This module provides a shared implementation for SQL-based position
//! stores (PostgreSQL, SQLite), parameterized by database type using the
//! `SqlDatabase` trait.

mod position_store;

pub use position_store::SqlPositionStore;

/// Trait for SQL database backends.
///
/// Abstracts over different SQL databases (PostgreSQL, SQLite) by providing
/// the pool type and query building methods.
pub trait SqlDatabase: Send + Sync + 'static {
    /// The connection pool type for this database.
    type Pool: Clone + Send + Sync;

    /// Build a SQL query string from a sea-query SELECT statement.
    fn build_select(stmt: sea_query::SelectStatement) -> String;

    /// Build a SQL query string from a sea-query INSERT statement.
    fn build_insert(stmt: sea_query::InsertStatement) -> String;

    /// Build a SQL query string from a sea-query UPDATE statement.
    fn build_update(stmt: sea_query::UpdateStatement) -> String;

    /// Make `stmt` a locking read, where the backend supports one.
    ///
    /// Reads that feed a later write in the same transaction (the
    /// max-position lookup on the create path) must block concurrent
    /// transactions in the same scope from acting on the same stale row.
    fn lock_for_update(stmt: &mut sea_query::SelectStatement);
}

#[cfg(feature = "postgres")]
pub mod postgres {
    //! PostgreSQL database backend.

    use sea_query::PostgresQueryBuilder;
    use sqlx::PgPool;

    /// PostgreSQL database marker type.
    pub struct Postgres;

    impl super::SqlDatabase for Postgres {
        type Pool = PgPool;

        fn build_select(stmt: sea_query::SelectStatement) -> String {
            stmt.to_string(PostgresQueryBuilder)
        }

        fn build_insert(stmt: sea_query::InsertStatement) -> String {
            stmt.to_string(PostgresQueryBuilder)
        }

        fn build_update(stmt: sea_query::UpdateStatement) -> String {
            stmt.to_string(PostgresQueryBuilder)
        }

        fn lock_for_update(stmt: &mut sea_query::SelectStatement) {
            stmt.lock(sea_query::LockType::Update);
        }
    }

    /// PostgreSQL position store.
    pub type PostgresPositionStore = super::SqlPositionStore<Postgres>;
}

#[cfg(feature = "sqlite")]
pub mod sqlite {
    //! SQLite database backend.

    use sea_query::SqliteQueryBuilder;
    use sqlx::SqlitePool;

    /// SQLite database marker type.
    pub struct Sqlite;

    impl super::SqlDatabase for Sqlite {
        type Pool = SqlitePool;

        fn build_select(stmt: sea_query::SelectStatement) -> String {
            stmt.to_string(SqliteQueryBuilder)
        }

        fn build_insert(stmt: sea_query::InsertStatement) -> String {
            stmt.to_string(SqliteQueryBuilder)
        }

        fn build_update(stmt: sea_query::UpdateStatement) -> String {
            stmt.to_string(SqliteQueryBuilder)
        }

        fn lock_for_update(_stmt: &mut sea_query::SelectStatement) {
            // SQLite has no FOR UPDATE; a single writer holds the database.
        }
    }

    /// SQLite position store.
    pub type SqlitePositionStore = super::SqlPositionStore<Sqlite>;
}
