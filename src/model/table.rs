//! Tabular data for table fragments.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A labeled grid of values: named columns plus rows keyed by an index
/// label, the shape a table fragment renders from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularData {
    /// Column labels, in display order.
    pub columns: Vec<String>,

    /// Data rows, in display order.
    pub rows: Vec<DataRow>,
}

impl TabularData {
    /// Create an empty table with the given column labels.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing trailing values render as empty cells.
    pub fn add_row<S: Into<String>>(&mut self, label: S, values: Vec<Value>) {
        self.rows.push(DataRow {
            label: label.into(),
            values,
        });
    }

    /// Append a row and return self, for literal-style construction.
    pub fn with_row<S: Into<String>>(mut self, label: S, values: Vec<Value>) -> Self {
        self.add_row(label, values);
        self
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of data columns (excluding the index).
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of a [`TabularData`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRow {
    /// Index label shown in the first column.
    pub label: String,

    /// Cell values, ordered to match the column labels.
    pub values: Vec<Value>,
}
