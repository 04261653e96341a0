// ============================================================
// UPLOAD SUMMARY USE CASE
// ============================================================
// Orchestrate validation, decoding, preview, and numeric analysis

use serde::Serialize;
use serde_json::{Map, Value};

use crate::application::use_cases::numeric_analysis::NumericAnalyzer;
use crate::domain::error::{AppError, Result};
use crate::domain::{ColumnAnalysis, Table};
use crate::infrastructure::decode::{decode_table, FileKind};

/// One sanitized preview row: column name -> JSON-safe cell value.
pub type PreviewRow = Map<String, Value>;

/// Summary block of the response.
#[derive(Debug, Serialize)]
pub struct TableStats {
    pub rows: usize,
    pub columns: usize,
    pub column_list: Vec<String>,
    pub numeric_analysis: Map<String, Value>,
}

/// Full response body for a processed upload.
#[derive(Debug, Serialize)]
pub struct UploadSummary {
    pub filename: String,
    pub preview: Vec<PreviewRow>,
    pub stats: TableStats,
}

/// Upload summarization use case.
pub struct UploadSummaryUseCase {
    analyzer: NumericAnalyzer,
    preview_rows: usize,
}

impl UploadSummaryUseCase {
    pub fn new(preview_rows: usize) -> Self {
        Self {
            analyzer: NumericAnalyzer::new(),
            preview_rows,
        }
    }

    /// Run the whole pipeline over one uploaded file.
    ///
    /// Validates the filename extension, decodes the bytes into a table,
    /// rejects empty tables, and assembles the preview and per-column stats.
    pub fn execute(&self, filename: &str, bytes: &[u8]) -> Result<UploadSummary> {
        let kind = FileKind::from_filename(filename)?;
        let table = decode_table(kind, bytes)?;

        if table.is_empty() {
            return Err(AppError::InvalidInput(
                "File contains no data or is corrupted".to_string(),
            ));
        }

        tracing::debug!(
            filename,
            rows = table.row_count(),
            columns = table.column_count(),
            "Decoded upload"
        );

        let preview = self.preview(&table);
        let numeric_analysis = self.analyzer.analyze(&table);

        Ok(assemble(filename, &table, preview, numeric_analysis))
    }

    /// First rows of the table with every cell passed through the sanitizer.
    fn preview(&self, table: &Table) -> Vec<PreviewRow> {
        table
            .rows
            .iter()
            .take(self.preview_rows)
            .map(|row| {
                table
                    .headers
                    .iter()
                    .zip(row.iter())
                    .map(|(name, cell)| (name.clone(), cell.json_safe()))
                    .collect()
            })
            .collect()
    }
}

impl Default for UploadSummaryUseCase {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Compose the response object. Pure; no failure modes of its own.
fn assemble(
    filename: &str,
    table: &Table,
    preview: Vec<PreviewRow>,
    numeric_analysis: Vec<(String, ColumnAnalysis)>,
) -> UploadSummary {
    let mut analysis_map = Map::new();
    for (name, analysis) in numeric_analysis {
        let value = serde_json::to_value(&analysis).unwrap_or(Value::Null);
        analysis_map.insert(name, value);
    }

    UploadSummary {
        filename: filename.to_string(),
        preview,
        stats: TableStats {
            rows: table.row_count(),
            columns: table.column_count(),
            column_list: table.headers.clone(),
            numeric_analysis: analysis_map,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPLOYEE_CSV: &str = "\
employee_id,first_name,salary
1001,Alice,75000
1002,Bob,85000
1003,Carol,70000
1004,Dan,90000";

    #[test]
    fn test_rejects_unknown_extension() {
        let use_case = UploadSummaryUseCase::default();
        let err = use_case.execute("data.txt", b"a,b\n1,2\n").unwrap_err();
        match err {
            AppError::InvalidInput(msg) => {
                assert_eq!(msg, "Only Excel or CSV files are accepted")
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_table() {
        let use_case = UploadSummaryUseCase::default();
        let err = use_case.execute("empty.csv", b"a,b,c\n").unwrap_err();
        match err {
            AppError::InvalidInput(msg) => {
                assert_eq!(msg, "File contains no data or is corrupted")
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_shape() {
        let use_case = UploadSummaryUseCase::default();
        let summary = use_case
            .execute("staff.csv", EMPLOYEE_CSV.as_bytes())
            .unwrap();

        assert_eq!(summary.filename, "staff.csv");
        assert_eq!(summary.stats.rows, 4);
        assert_eq!(summary.stats.columns, 3);
        assert_eq!(
            summary.stats.column_list,
            vec!["employee_id", "first_name", "salary"]
        );

        // first_name is text and must not be analyzed
        assert!(summary.stats.numeric_analysis.contains_key("employee_id"));
        assert!(summary.stats.numeric_analysis.contains_key("salary"));
        assert!(!summary.stats.numeric_analysis.contains_key("first_name"));

        let salary = &summary.stats.numeric_analysis["salary"];
        assert_eq!(salary["sum"], 320000.0);
        assert_eq!(salary["mean"], 80000.0);
        assert_eq!(salary["min"], 70000.0);
        assert_eq!(salary["max"], 90000.0);
    }

    #[test]
    fn test_preview_is_capped_at_three_rows() {
        let mut content = String::from("n\n");
        for i in 0..1000 {
            content.push_str(&format!("{}\n", i));
        }

        let use_case = UploadSummaryUseCase::default();
        let summary = use_case.execute("big.csv", content.as_bytes()).unwrap();

        assert_eq!(summary.preview.len(), 3);
        assert_eq!(summary.stats.rows, 1000);
    }

    #[test]
    fn test_preview_cells_keep_decoded_types() {
        let csv = "id,name,score,active\n1,Alice,9.5,true\n";
        let use_case = UploadSummaryUseCase::default();
        let summary = use_case.execute("mixed.csv", csv.as_bytes()).unwrap();

        let row = &summary.preview[0];
        assert_eq!(row["id"], serde_json::json!(1));
        assert_eq!(row["name"], serde_json::json!("Alice"));
        assert_eq!(row["score"], serde_json::json!(9.5));
        assert_eq!(row["active"], serde_json::json!(true));
    }

    #[test]
    fn test_corrupted_workbook_surfaces_decode_failure() {
        let use_case = UploadSummaryUseCase::default();
        let err = use_case
            .execute("broken.xlsx", b"not a workbook at all")
            .unwrap_err();
        match err {
            AppError::Processing(msg) => assert!(msg.contains("Failed to open workbook")),
            other => panic!("expected Processing, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_check_runs_before_decoding() {
        // Garbage bytes behind a bad extension must still be a 400-class
        // rejection, not a decode failure.
        let use_case = UploadSummaryUseCase::default();
        let err = use_case.execute("blob.bin", &[0xde, 0xad]).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_response_serializes_cleanly() {
        let use_case = UploadSummaryUseCase::default();
        let summary = use_case
            .execute("staff.csv", EMPLOYEE_CSV.as_bytes())
            .unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["stats"]["rows"], 4);
        assert_eq!(json["preview"].as_array().unwrap().len(), 3);
    }
}
