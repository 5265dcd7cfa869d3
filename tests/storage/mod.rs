//! Shared storage integration tests.
//!
//! Tests the PositionStore interface contract. Each backend harness imports
//! these functions and runs them against its own store.

pub mod position_store_tests;
