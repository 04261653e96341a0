// ============================================================
// TABULAR DECODING
// ============================================================
// Dispatch raw upload bytes to the matching decoder

mod csv;
mod workbook;

pub use csv::CsvDecoder;

use crate::domain::error::AppError;
use crate::domain::Table;

/// Decoder family an upload is routed to, based on its filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Workbook,
}

impl FileKind {
    /// Classify a filename by its extension (case-sensitive suffix match).
    ///
    /// Accepted: `.csv`, `.xlsx`, `.xls`. Anything else is rejected before a
    /// single upload byte is inspected.
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        if filename.ends_with(".csv") {
            Ok(FileKind::Csv)
        } else if filename.ends_with(".xlsx") || filename.ends_with(".xls") {
            Ok(FileKind::Workbook)
        } else {
            Err(AppError::InvalidInput(
                "Only Excel or CSV files are accepted".to_string(),
            ))
        }
    }
}

/// Decode upload bytes into a Table using the decoder for `kind`.
pub fn decode_table(kind: FileKind, bytes: &[u8]) -> Result<Table, AppError> {
    match kind {
        FileKind::Csv => CsvDecoder::new().decode(bytes),
        FileKind::Workbook => workbook::decode(bytes),
    }
}
