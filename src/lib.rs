//! Reorder - dense position maintenance for SQL-backed records
//!
//! Maintains a dense, zero-based, gap-free integer ordering over sets of
//! rows, optionally partitioned into independent sequences by a scope
//! column, and relocates rows atomically so the ordering stays contiguous.
//!
//! - [`PositionManager`] runs the move algorithm and assigns positions to
//!   newly created rows, one transaction per operation.
//! - [`PositionStore`] is the transactional read/write seam; SQL
//!   implementations live in [`storage`] (SQLite, PostgreSQL).
//! - [`Sortable`] is implemented by record types, including the
//!   capability check consulted before externally requested moves.

pub mod config;
pub mod interfaces;
pub mod manager;
pub mod storage;

pub use config::SequenceConfig;
pub use interfaces::{
    Direction, FieldValue, PositionError, PositionStore, Result, SequenceEntry, Shift, Sortable,
};
pub use manager::PositionManager;
