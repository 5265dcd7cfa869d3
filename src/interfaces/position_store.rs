//! Position storage interface.

use async_trait::async_trait;

use super::sortable::FieldValue;

/// Result type for position operations.
pub type Result<T> = std::result::Result<T, PositionError>;

/// Errors that can occur while maintaining positions.
///
/// `NotFound`, `Unauthorized` and `InvalidPosition` are client errors and
/// never worth retrying; `Database` covers transient store failures that the
/// caller may retry as a whole command.
#[derive(Debug, thiserror::Error)]
pub enum PositionError {
    #[error("record not found: {table}.{key}")]
    NotFound { table: String, key: String },

    #[error("actor is not permitted to reposition this record")]
    Unauthorized,

    #[error("invalid target position: {position}")]
    InvalidPosition { position: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl PositionError {
    /// Whether the whole command may be retried by the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, PositionError::Database(_))
    }
}

/// Direction of a one-step range shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    /// Add one to every position in the range.
    Increment,
    /// Subtract one from every position in the range.
    Decrement,
}

impl Shift {
    /// The delta applied to the position column.
    pub fn delta(self) -> i64 {
        match self {
            Shift::Increment => 1,
            Shift::Decrement => -1,
        }
    }
}

/// Sort direction for ordered sequence listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One row of a sequence listing: key plus current position.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceEntry {
    pub key: FieldValue,
    pub position: i64,
}

/// Interface for scoped, transactional access to position fields.
///
/// Every operation takes a transaction handle obtained from
/// [`PositionStore::begin`], so the manager can compose a read, a range
/// shift and a single-row update into one atomic unit. Dropping the handle
/// without [`PositionStore::commit`] rolls everything back.
///
/// # Implementations
///
/// - `SqlitePositionStore`: SQLite storage
/// - `PostgresPositionStore`: PostgreSQL storage
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Transaction handle type.
    type Tx: Send;

    /// Open a transaction on the underlying store.
    ///
    /// Isolation is the backend's default. The set-based range update locks
    /// the rows it touches, and [`PositionStore::max_position`] is a locking
    /// read where the backend supports one, so two concurrent operations in
    /// one scope cannot both act on the same stale state. SQLite serializes
    /// writers outright. An empty scope has no rows to lock; on PostgreSQL
    /// the first two inserts into a brand-new scope can still race.
    async fn begin(&self) -> Result<Self::Tx>;

    /// Commit a transaction.
    async fn commit(&self, tx: Self::Tx) -> Result<()>;

    /// Highest position in the sequence identified by `scope`, or `None`
    /// when the sequence is empty.
    ///
    /// Implemented as a locking read of the scope's highest-position row
    /// (`FOR UPDATE` on PostgreSQL): a concurrent transaction reading the
    /// same scope blocks until this one commits or rolls back.
    async fn max_position(&self, tx: &mut Self::Tx, scope: &FieldValue) -> Result<Option<i64>>;

    /// Shift every position in `[low, high]` within `scope` by one step,
    /// as a single set-based update. Returns the number of rows touched.
    async fn shift_range(
        &self,
        tx: &mut Self::Tx,
        scope: &FieldValue,
        low: i64,
        high: i64,
        shift: Shift,
    ) -> Result<u64>;

    /// Persist a new position for exactly one record.
    ///
    /// Fails with [`PositionError::NotFound`] when no row matches `key`.
    async fn set_position(&self, tx: &mut Self::Tx, key: &FieldValue, position: i64)
        -> Result<()>;

    /// Insert a new row with the given key, scope and position.
    async fn insert(
        &self,
        tx: &mut Self::Tx,
        key: &FieldValue,
        scope: &FieldValue,
        position: i64,
    ) -> Result<()>;

    /// All positions in `scope`, ascending.
    async fn positions(&self, tx: &mut Self::Tx, scope: &FieldValue) -> Result<Vec<i64>>;

    /// Keys and positions in `scope`, ordered by position.
    async fn ordered(
        &self,
        tx: &mut Self::Tx,
        scope: &FieldValue,
        direction: Direction,
    ) -> Result<Vec<SequenceEntry>>;
}
