//! Unified SQL PositionStore implementation.
//!
//! Uses a macro to generate implementations for each SQL backend,
//! eliminating code duplication while maintaining type safety. Query
//! building is shared; only pool/transaction types differ per backend.

use std::marker::PhantomData;

use sea_query::{
    Alias, ConditionalStatement, Expr, InsertStatement, Order, Query, SelectStatement,
    UpdateStatement, Value,
};

use crate::config::SequenceConfig;
use crate::interfaces::{Direction, FieldValue};

use super::SqlDatabase;

impl From<&FieldValue> for Value {
    fn from(v: &FieldValue) -> Self {
        match v {
            FieldValue::Null => Value::BigInt(None),
            FieldValue::Int(i) => (*i).into(),
            FieldValue::Text(s) => s.clone().into(),
        }
    }
}

fn order(direction: Direction) -> Order {
    match direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    }
}

/// SQL-based implementation of PositionStore.
///
/// This generic implementation works with any SQL database that implements
/// the `SqlDatabase` trait (PostgreSQL, SQLite). One store instance manages
/// one table, described by the `SequenceConfig` given at construction.
pub struct SqlPositionStore<DB: SqlDatabase> {
    pool: DB::Pool,
    config: SequenceConfig,
    _marker: PhantomData<DB>,
}

impl<DB: SqlDatabase> SqlPositionStore<DB> {
    /// Create a new SQL position store over the given pool and table.
    pub fn new(pool: DB::Pool, config: SequenceConfig) -> Self {
        Self {
            pool,
            config,
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &DB::Pool {
        &self.pool
    }

    /// The sequence configuration this store was built with.
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    fn table(&self) -> Alias {
        Alias::new(self.config.table.as_str())
    }

    fn id_col(&self) -> Alias {
        Alias::new(self.config.id_column.as_str())
    }

    fn position_col(&self) -> Alias {
        Alias::new(self.config.position_column.as_str())
    }

    /// Restrict a statement to the sequence identified by `scope`.
    ///
    /// No configured scope column leaves the base statement untouched. A
    /// null scope becomes an explicit `IS NULL` predicate, so null-scoped
    /// rows match each other and nothing else.
    fn apply_scope<S: ConditionalStatement>(&self, stmt: &mut S, scope: &FieldValue) {
        let Some(column) = self.config.scope_column.as_deref() else {
            return;
        };
        match scope {
            FieldValue::Null => {
                stmt.and_where(Expr::col(Alias::new(column)).is_null());
            }
            value => {
                stmt.and_where(Expr::col(Alias::new(column)).eq(Value::from(value)));
            }
        }
    }

    /// The max read is a locking read of the scope's highest-position row
    /// rather than an aggregate: `FOR UPDATE` cannot be combined with
    /// `MAX()`, and the row lock is what keeps two concurrent creations
    /// from both seeing the same maximum.
    fn max_position_stmt(&self, scope: &FieldValue) -> SelectStatement {
        let mut stmt = Query::select();
        stmt.column(self.position_col())
            .from(self.table())
            .order_by(self.position_col(), Order::Desc)
            .limit(1);
        self.apply_scope(&mut stmt, scope);
        DB::lock_for_update(&mut stmt);
        stmt
    }

    fn shift_range_stmt(
        &self,
        scope: &FieldValue,
        low: i64,
        high: i64,
        delta: i64,
    ) -> UpdateStatement {
        let shifted = if delta >= 0 {
            Expr::col(self.position_col()).add(delta)
        } else {
            Expr::col(self.position_col()).sub(-delta)
        };
        let mut stmt = Query::update();
        stmt.table(self.table())
            .value(self.position_col(), shifted)
            .and_where(Expr::col(self.position_col()).between(low, high));
        self.apply_scope(&mut stmt, scope);
        stmt
    }

    fn set_position_stmt(&self, key: &FieldValue, position: i64) -> UpdateStatement {
        let mut stmt = Query::update();
        stmt.table(self.table())
            .value(self.position_col(), position)
            .and_where(Expr::col(self.id_col()).eq(Value::from(key)));
        stmt
    }

    fn insert_stmt(&self, key: &FieldValue, scope: &FieldValue, position: i64) -> InsertStatement {
        let mut stmt = Query::insert();
        stmt.into_table(self.table());
        if let Some(column) = self.config.scope_column.as_deref() {
            stmt.columns([self.id_col(), Alias::new(column), self.position_col()])
                .values_panic([
                    Value::from(key).into(),
                    Value::from(scope).into(),
                    position.into(),
                ]);
        } else {
            stmt.columns([self.id_col(), self.position_col()])
                .values_panic([Value::from(key).into(), position.into()]);
        }
        stmt
    }

    fn positions_stmt(&self, scope: &FieldValue) -> SelectStatement {
        let mut stmt = Query::select();
        stmt.column(self.position_col())
            .from(self.table())
            .order_by(self.position_col(), Order::Asc);
        self.apply_scope(&mut stmt, scope);
        stmt
    }

    fn ordered_stmt(&self, scope: &FieldValue, direction: Direction) -> SelectStatement {
        let mut stmt = Query::select();
        stmt.columns([self.id_col(), self.position_col()])
            .from(self.table())
            .order_by(self.position_col(), order(direction));
        self.apply_scope(&mut stmt, scope);
        stmt
    }
}

/// Macro to implement PositionStore for a specific SQL backend.
///
/// This eliminates duplication between PostgreSQL and SQLite implementations
/// while maintaining full type safety.
macro_rules! impl_position_store {
    ($db_type:ty, $sqlx_db:ty, $feature:literal) => {
        #[cfg(feature = $feature)]
        #[async_trait::async_trait]
        impl crate::interfaces::PositionStore for SqlPositionStore<$db_type> {
            type Tx = sqlx::Transaction<'static, $sqlx_db>;

            async fn begin(&self) -> crate::interfaces::Result<Self::Tx> {
                Ok(self.pool.begin().await?)
            }

            async fn commit(&self, tx: Self::Tx) -> crate::interfaces::Result<()> {
                tx.commit().await?;
                Ok(())
            }

            async fn max_position(
                &self,
                tx: &mut Self::Tx,
                scope: &FieldValue,
            ) -> crate::interfaces::Result<Option<i64>> {
                use sqlx::Row;

                let sql = <$db_type>::build_select(self.max_position_stmt(scope));
                let row = sqlx::query(&sql).fetch_optional(&mut **tx).await?;
                match row {
                    Some(row) => Ok(Some(row.try_get(0)?)),
                    None => Ok(None),
                }
            }

            async fn shift_range(
                &self,
                tx: &mut Self::Tx,
                scope: &FieldValue,
                low: i64,
                high: i64,
                shift: crate::interfaces::Shift,
            ) -> crate::interfaces::Result<u64> {
                let sql =
                    <$db_type>::build_update(self.shift_range_stmt(scope, low, high, shift.delta()));
                let result = sqlx::query(&sql).execute(&mut **tx).await?;
                tracing::debug!(
                    "shifted [{}, {}] by {} in {}: {} rows",
                    low,
                    high,
                    shift.delta(),
                    self.config.table,
                    result.rows_affected()
                );
                Ok(result.rows_affected())
            }

            async fn set_position(
                &self,
                tx: &mut Self::Tx,
                key: &FieldValue,
                position: i64,
            ) -> crate::interfaces::Result<()> {
                let sql = <$db_type>::build_update(self.set_position_stmt(key, position));
                let result = sqlx::query(&sql).execute(&mut **tx).await?;
                if result.rows_affected() == 0 {
                    return Err(crate::interfaces::PositionError::NotFound {
                        table: self.config.table.clone(),
                        key: key.to_string(),
                    });
                }
                Ok(())
            }

            async fn insert(
                &self,
                tx: &mut Self::Tx,
                key: &FieldValue,
                scope: &FieldValue,
                position: i64,
            ) -> crate::interfaces::Result<()> {
                let sql = <$db_type>::build_insert(self.insert_stmt(key, scope, position));
                sqlx::query(&sql).execute(&mut **tx).await?;
                Ok(())
            }

            async fn positions(
                &self,
                tx: &mut Self::Tx,
                scope: &FieldValue,
            ) -> crate::interfaces::Result<Vec<i64>> {
                use sqlx::Row;

                let sql = <$db_type>::build_select(self.positions_stmt(scope));
                let rows = sqlx::query(&sql).fetch_all(&mut **tx).await?;
                let mut positions = Vec::with_capacity(rows.len());
                for row in rows {
                    positions.push(row.try_get(0)?);
                }
                Ok(positions)
            }

            async fn ordered(
                &self,
                tx: &mut Self::Tx,
                scope: &FieldValue,
                direction: Direction,
            ) -> crate::interfaces::Result<Vec<crate::interfaces::SequenceEntry>> {
                use sqlx::Row;

                let sql = <$db_type>::build_select(self.ordered_stmt(scope, direction));
                let rows = sqlx::query(&sql).fetch_all(&mut **tx).await?;

                let id_col = self.config.id_column.as_str();
                let position_col = self.config.position_column.as_str();
                let mut entries = Vec::with_capacity(rows.len());
                for row in rows {
                    let key = match row.try_get::<i64, _>(id_col) {
                        Ok(v) => FieldValue::Int(v),
                        Err(_) => FieldValue::Text(row.try_get::<String, _>(id_col)?),
                    };
                    entries.push(crate::interfaces::SequenceEntry {
                        key,
                        position: row.try_get(position_col)?,
                    });
                }
                Ok(entries)
            }
        }
    };
}

// Generate implementations for each SQL backend
#[cfg(feature = "postgres")]
impl_position_store!(super::postgres::Postgres, sqlx::Postgres, "postgres");
#[cfg(feature = "sqlite")]
impl_position_store!(super::sqlite::Sqlite, sqlx::Sqlite, "sqlite");
