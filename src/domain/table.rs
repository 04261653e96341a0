// ============================================================
// TABLE TYPES
// ============================================================
// In-memory representation of a decoded upload and its statistics

use serde::{Deserialize, Serialize};

use super::CellValue;

/// A decoded tabular file: named columns over row-major cells.
///
/// Invariant: every row holds exactly `headers.len()` cells; decoders pad or
/// truncate ragged records to keep this true.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names from the header row, in file order.
    pub headers: Vec<String>,

    /// Data rows (the header row is not included).
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create a table, normalizing each row to the header width.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        for row in rows.iter_mut() {
            row.resize(width, CellValue::Empty);
        }
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

/// Aggregates over the valid numeric values of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Outcome of analyzing one numeric column.
///
/// Serialized untagged: a stats object on success, a bare string when the
/// column could not be aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnAnalysis {
    Stats(ColumnStats),
    Failed(String),
}
