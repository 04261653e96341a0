// ============================================================
// NUMERIC ANALYSIS USE CASE
// ============================================================
// Select numeric columns and aggregate their valid values

use crate::domain::{CellValue, ColumnAnalysis, ColumnStats, Table};

/// Per-column numeric aggregation.
///
/// A column qualifies when more than `min_numeric_fraction` of its non-empty
/// cells decoded as numeric kind. Within a qualifying column, entries that
/// cannot be coerced to a finite number are dropped before aggregation,
/// never zeroed.
pub struct NumericAnalyzer {
    /// Fraction of non-empty cells that must be numeric for a column to
    /// participate (exclusive bound).
    min_numeric_fraction: f64,
}

impl Default for NumericAnalyzer {
    fn default() -> Self {
        Self {
            min_numeric_fraction: 0.5,
        }
    }
}

impl NumericAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze every numeric column of the table, in column order.
    ///
    /// A column that cannot be aggregated contributes an error-marker string
    /// instead of stats; it never aborts the other columns.
    pub fn analyze(&self, table: &Table) -> Vec<(String, ColumnAnalysis)> {
        table
            .headers
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_numeric_column(table, *index))
            .map(|(index, name)| (name.clone(), self.analyze_column(table, index)))
            .collect()
    }

    fn is_numeric_column(&self, table: &Table, index: usize) -> bool {
        let mut non_empty = 0usize;
        let mut numeric = 0usize;

        for cell in table.column(index) {
            if matches!(cell, CellValue::Empty) {
                continue;
            }
            non_empty += 1;
            if cell.is_numeric() {
                numeric += 1;
            }
        }

        non_empty > 0 && (numeric as f64) > (non_empty as f64) * self.min_numeric_fraction
    }

    fn analyze_column(&self, table: &Table, index: usize) -> ColumnAnalysis {
        let values: Vec<f64> = table
            .column(index)
            .filter_map(CellValue::as_number)
            .collect();

        if values.is_empty() {
            return ColumnAnalysis::Failed("no valid numeric values after coercion".to_string());
        }

        let sum: f64 = values.iter().sum();
        let mut min = values[0];
        let mut max = values[0];
        for &v in &values[1..] {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }

        ColumnAnalysis::Stats(ColumnStats {
            sum,
            mean: sum / values.len() as f64,
            min,
            max,
        })
    }
}
