//! PositionStore interface tests.
//!
//! These tests verify the contract of the PositionStore trait. Each storage
//! implementation should run them against a freshly created, empty table.

use reorder::{Direction, FieldValue, PositionStore, Shift};

// =============================================================================
// PositionStore::max_position tests
// =============================================================================

pub async fn test_max_position_empty<S: PositionStore>(store: &S) {
    let mut tx = store.begin().await.expect("begin should succeed");
    let max = store
        .max_position(&mut tx, &FieldValue::Null)
        .await
        .expect("max_position should succeed");
    store.commit(tx).await.expect("commit should succeed");

    assert!(max.is_none(), "empty sequence has no max position");
}

pub async fn test_insert_and_max<S: PositionStore>(store: &S) {
    let mut tx = store.begin().await.unwrap();
    store
        .insert(&mut tx, &FieldValue::from("a"), &FieldValue::Null, 0)
        .await
        .expect("insert should succeed");
    store
        .insert(&mut tx, &FieldValue::from("b"), &FieldValue::Null, 1)
        .await
        .expect("insert should succeed");
    let max = store.max_position(&mut tx, &FieldValue::Null).await.unwrap();
    store.commit(tx).await.unwrap();

    assert_eq!(max, Some(1), "max should reflect uncommitted inserts");
}

// =============================================================================
// PositionStore::shift_range tests
// =============================================================================

pub async fn test_shift_range_decrement<S: PositionStore>(store: &S) {
    let mut tx = store.begin().await.unwrap();
    for (key, position) in [("a", 0), ("b", 1), ("c", 2)] {
        store
            .insert(&mut tx, &FieldValue::from(key), &FieldValue::Null, position)
            .await
            .unwrap();
    }

    let affected = store
        .shift_range(&mut tx, &FieldValue::Null, 1, 2, Shift::Decrement)
        .await
        .expect("shift_range should succeed");
    assert_eq!(affected, 2, "only rows inside the range shift");

    let positions = store.positions(&mut tx, &FieldValue::Null).await.unwrap();
    store.commit(tx).await.unwrap();
    assert_eq!(positions, vec![0, 0, 1]);
}

pub async fn test_shift_range_respects_scope<S: PositionStore>(store: &S) {
    let scope_a = FieldValue::from("A");
    let scope_b = FieldValue::from("B");

    let mut tx = store.begin().await.unwrap();
    store
        .insert(&mut tx, &FieldValue::from("a0"), &scope_a, 0)
        .await
        .unwrap();
    store
        .insert(&mut tx, &FieldValue::from("b0"), &scope_b, 0)
        .await
        .unwrap();

    let affected = store
        .shift_range(&mut tx, &scope_a, 0, 0, Shift::Increment)
        .await
        .unwrap();
    assert_eq!(affected, 1, "shift must not cross scopes");

    let b_positions = store.positions(&mut tx, &scope_b).await.unwrap();
    store.commit(tx).await.unwrap();
    assert_eq!(b_positions, vec![0], "other scope untouched");
}

// =============================================================================
// PositionStore::set_position tests
// =============================================================================

pub async fn test_set_position<S: PositionStore>(store: &S) {
    let mut tx = store.begin().await.unwrap();
    store
        .insert(&mut tx, &FieldValue::from("a"), &FieldValue::Null, 0)
        .await
        .unwrap();
    store
        .set_position(&mut tx, &FieldValue::from("a"), 5)
        .await
        .expect("set_position should succeed");

    let positions = store.positions(&mut tx, &FieldValue::Null).await.unwrap();
    store.commit(tx).await.unwrap();
    assert_eq!(positions, vec![5]);
}

pub async fn test_set_position_missing_row<S: PositionStore>(store: &S) {
    let mut tx = store.begin().await.unwrap();
    let err = store
        .set_position(&mut tx, &FieldValue::from("ghost"), 0)
        .await
        .expect_err("updating an absent row must fail");

    assert!(
        matches!(err, reorder::PositionError::NotFound { .. }),
        "expected NotFound, got: {err}"
    );
    assert!(!err.is_transient(), "NotFound is not retryable");
}

// =============================================================================
// Scope isolation tests
// =============================================================================

pub async fn test_null_scope_is_its_own_sequence<S: PositionStore>(store: &S) {
    let mut tx = store.begin().await.unwrap();
    store
        .insert(&mut tx, &FieldValue::from("n0"), &FieldValue::Null, 0)
        .await
        .unwrap();
    store
        .insert(&mut tx, &FieldValue::from("n1"), &FieldValue::Null, 1)
        .await
        .unwrap();
    store
        .insert(&mut tx, &FieldValue::from("a0"), &FieldValue::from("A"), 0)
        .await
        .unwrap();

    let null_max = store.max_position(&mut tx, &FieldValue::Null).await.unwrap();
    let a_max = store
        .max_position(&mut tx, &FieldValue::from("A"))
        .await
        .unwrap();
    store.commit(tx).await.unwrap();

    assert_eq!(null_max, Some(1), "null scope counts only null rows");
    assert_eq!(a_max, Some(0), "named scope counts only its rows");
}

// =============================================================================
// Ordered listing tests
// =============================================================================

pub async fn test_ordered_listing<S: PositionStore>(store: &S) {
    let mut tx = store.begin().await.unwrap();
    for (key, position) in [("b", 1), ("a", 0), ("c", 2)] {
        store
            .insert(&mut tx, &FieldValue::from(key), &FieldValue::Null, position)
            .await
            .unwrap();
    }

    let asc = store
        .ordered(&mut tx, &FieldValue::Null, Direction::Asc)
        .await
        .unwrap();
    let desc = store
        .ordered(&mut tx, &FieldValue::Null, Direction::Desc)
        .await
        .unwrap();
    store.commit(tx).await.unwrap();

    let asc_keys: Vec<_> = asc.iter().map(|e| e.key.clone()).collect();
    let desc_keys: Vec<_> = desc.iter().map(|e| e.key.clone()).collect();
    assert_eq!(
        asc_keys,
        vec![
            FieldValue::from("a"),
            FieldValue::from("b"),
            FieldValue::from("c")
        ]
    );
    assert_eq!(
        desc_keys,
        vec![
            FieldValue::from("c"),
            FieldValue::from("b"),
            FieldValue::from("a")
        ]
    );
    assert_eq!(asc[0].position, 0);
    assert_eq!(asc[2].position, 2);
}

// =============================================================================
// Rollback tests
// =============================================================================

pub async fn test_dropped_transaction_rolls_back<S: PositionStore>(store: &S) {
    {
        let mut tx = store.begin().await.unwrap();
        store
            .insert(&mut tx, &FieldValue::from("a"), &FieldValue::Null, 0)
            .await
            .unwrap();
        // Dropped without commit.
    }

    let mut tx = store.begin().await.unwrap();
    let max = store.max_position(&mut tx, &FieldValue::Null).await.unwrap();
    store.commit(tx).await.unwrap();
    assert!(max.is_none(), "uncommitted insert must not be visible");
}
