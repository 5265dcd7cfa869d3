//! The position maintenance algorithm.
//!
//! [`PositionManager`] holds no state of its own: it orchestrates reads and
//! writes through a [`PositionStore`], opening and closing the transaction
//! that makes each multi-step operation atomic. A failed step rolls the
//! whole operation back; partial shifts are never observable.

use tracing::debug;

use crate::interfaces::{
    Direction, FieldValue, PositionError, PositionStore, Result, SequenceEntry, Shift, Sortable,
};

/// Maintains dense, zero-based positions over the sequences of one entity
/// type.
///
/// A move is a rotation of the sub-range between the old and new position,
/// not a pairwise swap: the records between the two endpoints each shift by
/// one to absorb the gap, so the sequence stays a contiguous permutation of
/// `0..n-1` across every successful call.
pub struct PositionManager<S: PositionStore> {
    store: S,
}

impl<S: PositionStore> PositionManager<S> {
    /// Create a manager over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a record at the end of its sequence and return the assigned
    /// position: `0` for an empty sequence, `max + 1` otherwise.
    ///
    /// The read and the insert share one transaction, so a failed creation
    /// consumes no position.
    pub async fn create(&self, key: &FieldValue, scope: &FieldValue) -> Result<i64> {
        let mut tx = self.store.begin().await?;

        let position = match self.store.max_position(&mut tx, scope).await? {
            Some(max) => max + 1,
            None => 0,
        };
        self.store.insert(&mut tx, key, scope, position).await?;

        self.store.commit(tx).await?;
        debug!("created {} at position {}", key, position);
        Ok(position)
    }

    /// Create a record with an explicit position, skipping auto-assignment.
    ///
    /// Neighbors are not renumbered; the caller owns the consequences for
    /// sequence density.
    pub async fn create_at(
        &self,
        key: &FieldValue,
        scope: &FieldValue,
        position: i64,
    ) -> Result<()> {
        if position < 0 {
            return Err(PositionError::InvalidPosition { position });
        }

        let mut tx = self.store.begin().await?;
        self.store.insert(&mut tx, key, scope, position).await?;
        self.store.commit(tx).await
    }

    /// Move a record to `new_position`, renumbering the records between the
    /// old and new position so the sequence stays contiguous.
    ///
    /// Moving a record to its current position is a no-op and issues no
    /// store writes. The shift and the target update run in one
    /// transaction.
    pub async fn set_position(&self, record: &impl Sortable, new_position: i64) -> Result<()> {
        if new_position < 0 {
            return Err(PositionError::InvalidPosition {
                position: new_position,
            });
        }

        let old_position = record.position();
        if new_position == old_position {
            return Ok(());
        }

        let key = record.key();
        let scope = record.scope_value();

        let mut tx = self.store.begin().await?;

        if new_position > old_position {
            // Moving down: the records it passes move up one to fill the gap.
            self.store
                .shift_range(&mut tx, &scope, old_position + 1, new_position, Shift::Decrement)
                .await?;
        } else {
            // Moving up: the records it passes move down one to make room.
            self.store
                .shift_range(&mut tx, &scope, new_position, old_position - 1, Shift::Increment)
                .await?;
        }
        self.store.set_position(&mut tx, &key, new_position).await?;

        self.store.commit(tx).await?;
        debug!("moved {} from {} to {}", key, old_position, new_position);
        Ok(())
    }

    /// Externally requested move: consult the record's capability check
    /// before touching the store, then delegate to
    /// [`PositionManager::set_position`].
    pub async fn move_position<R: Sortable>(
        &self,
        record: &R,
        new_position: i64,
        actor: &R::Actor,
    ) -> Result<()> {
        if !record.can_be_positioned_by(actor) {
            return Err(PositionError::Unauthorized);
        }
        self.set_position(record, new_position).await
    }

    /// Highest position in `scope`, or `None` for an empty sequence.
    pub async fn max_position(&self, scope: &FieldValue) -> Result<Option<i64>> {
        let mut tx = self.store.begin().await?;
        let max = self.store.max_position(&mut tx, scope).await?;
        self.store.commit(tx).await?;
        Ok(max)
    }

    /// Keys and positions of `scope`, ordered by position.
    pub async fn sequence(
        &self,
        scope: &FieldValue,
        direction: Direction,
    ) -> Result<Vec<SequenceEntry>> {
        let mut tx = self.store.begin().await?;
        let entries = self.store.ordered(&mut tx, scope, direction).await?;
        self.store.commit(tx).await?;
        Ok(entries)
    }
}
