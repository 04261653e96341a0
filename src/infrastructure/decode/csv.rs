// ============================================================
// CSV DECODER
// ============================================================
// Decode CSV bytes into a Table with per-cell type inference

use csv::{ReaderBuilder, Trim};

use crate::domain::error::AppError;
use crate::domain::{CellValue, Table};

/// CSV decoder with fixed comma delimiter and a header row.
pub struct CsvDecoder {
    delimiter: u8,
    trim: bool,
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Decode raw upload bytes into a Table.
    ///
    /// Input must be valid UTF-8 (a leading BOM is tolerated); anything else
    /// is a decode failure the caller surfaces as-is.
    pub fn decode(&self, bytes: &[u8]) -> Result<Table, AppError> {
        let (content, had_errors) = decode_utf8(bytes);
        if had_errors {
            return Err(AppError::Processing(
                "File is not valid UTF-8 text".to_string(),
            ));
        }

        self.decode_content(&content)
    }

    /// Decode CSV content from a string.
    pub fn decode_content(&self, content: &str) -> Result<Table, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::Processing(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::Processing(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let row: Vec<CellValue> = (0..headers.len())
                .map(|idx| infer_cell(record.get(idx).unwrap_or("")))
                .collect();
            rows.push(row);
        }

        Ok(Table::new(headers, rows))
    }
}

/// Strict UTF-8 decode with BOM removal; reports whether invalid sequences
/// were encountered instead of silently replacing them.
fn decode_utf8(bytes: &[u8]) -> (String, bool) {
    let (content, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    (content.into_owned(), had_errors)
}

/// Infer the typed value of one raw field.
fn infer_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }
    CellValue::Text(trimmed.to_string())
}
