//! The `Sortable` contract for position-managed records.

use std::fmt;

/// A scope or key value carried by a positioned record.
///
/// `Null` is a real scope value: null-scoped rows form their own sequence,
/// distinct from every non-null scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Null,
    Int(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// Interface for records whose ordering is managed by a
/// [`PositionManager`](crate::manager::PositionManager).
///
/// Implementations expose the key, current position and scope value of a
/// loaded record, plus the capability check consulted before an externally
/// requested move.
pub trait Sortable {
    /// The actor type checked by [`Sortable::can_be_positioned_by`].
    type Actor: ?Sized;

    /// Primary key value of this record.
    fn key(&self) -> FieldValue;

    /// Current zero-based position within the record's sequence.
    fn position(&self) -> i64;

    /// Scope value identifying the record's sequence.
    ///
    /// Ignored when the store has no scope column configured.
    fn scope_value(&self) -> FieldValue {
        FieldValue::Null
    }

    /// Whether `actor` may reposition this record. Deny by default; record
    /// variants opt in explicitly.
    fn can_be_positioned_by(&self, _actor: &Self::Actor) -> bool {
        false
    }
}
