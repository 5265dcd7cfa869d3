//! Abstract interfaces for position maintenance.
//!
//! These traits define the contracts for:
//! - Position storage (scoped, transactional access to position fields)
//! - Sortable records (key/position/scope accessors and the capability check)

pub mod position_store;
pub mod sortable;

pub use position_store::{
    Direction, PositionError, PositionStore, Result, SequenceEntry, Shift,
};
pub use sortable::{FieldValue, Sortable};
