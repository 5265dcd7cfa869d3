//! Sequence configuration.
//!
//! Column and table names are resolved once, at store construction, rather
//! than probed per call. One `SequenceConfig` describes one managed table.

use serde::Deserialize;

/// Describes how positions are stored for one entity type.
///
/// When `scope_column` is set, rows sharing a value in that column form an
/// independent sequence, each numbered from zero. A SQL `NULL` in the scope
/// column is a valid scope value and groups only with other `NULL` rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Table holding the positioned rows.
    pub table: String,
    /// Primary key column.
    pub id_column: String,
    /// Integer column holding the zero-based position.
    pub position_column: String,
    /// Optional column partitioning rows into independent sequences.
    pub scope_column: Option<String>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            table: "records".to_string(),
            id_column: "id".to_string(),
            position_column: "position".to_string(),
            scope_column: None,
        }
    }
}

impl SequenceConfig {
    /// Create a configuration for `table` with default column names.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    /// Override the primary key column name.
    pub fn with_id_column(mut self, column: &str) -> Self {
        self.id_column = column.to_string();
        self
    }

    /// Override the position column name.
    pub fn with_position_column(mut self, column: &str) -> Self {
        self.position_column = column.to_string();
        self
    }

    /// Partition sequences by the given column.
    pub fn with_scope_column(mut self, column: &str) -> Self {
        self.scope_column = Some(column.to_string());
        self
    }
}
