//! Schema helpers for self-managed tables.
//!
//! Production deployments usually add the position column to an existing
//! table via their own migrations; this generates the minimal table for
//! standalone use and tests.

use crate::config::SequenceConfig;

/// SQL for creating the managed table described by `config`.
///
/// Keys are stored as text, positions as 64-bit integers. The scope column
/// (when configured) is nullable, since a null scope is a valid sequence.
pub fn create_table_sql(config: &SequenceConfig) -> String {
    let scope_column = config
        .scope_column
        .as_deref()
        .map(|column| format!("    {} TEXT,\n", column))
        .unwrap_or_default();

    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n    {id} TEXT PRIMARY KEY,\n{scope_column}    {position} BIGINT NOT NULL\n);\nCREATE INDEX IF NOT EXISTS idx_{table}_{position} ON {table}({position});\n",
        table = config.table,
        id = config.id_column,
        position = config.position_column,
    )
}
