// ============================================================
// WORKBOOK DECODER
// ============================================================
// Decode Excel workbook bytes (xlsx/xls) into a Table

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};

use crate::domain::error::AppError;
use crate::domain::{CellValue, Table};

/// Decode workbook bytes into a Table.
///
/// The workbook format is sniffed from the bytes, so both `.xlsx` and `.xls`
/// uploads land here. Only the first sheet is read; its first row is the
/// header.
pub fn decode(bytes: &[u8]) -> Result<Table, AppError> {
    let cursor = Cursor::new(bytes);
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::Processing(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Processing("No worksheet found in workbook".to_string()))?
        .map_err(|e| AppError::Processing(format!("Failed to read worksheet: {}", e)))?;

    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| {
                cell.as_string()
                    .unwrap_or_else(|| format!("{}", cell))
                    .trim()
                    .to_string()
            })
            .collect(),
        None => Vec::new(),
    };

    let data_rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(Table::new(headers, data_rows))
}

/// Map one typed workbook cell onto the domain cell set.
///
/// Date and error cells have no numeric meaning here and degrade to their
/// text rendering.
fn convert_cell(cell: &Data) -> CellValue {
    if cell.is_empty() {
        CellValue::Empty
    } else if cell.is_int() {
        cell.get_int().map(CellValue::Int).unwrap_or(CellValue::Empty)
    } else if cell.is_float() {
        cell.get_float()
            .map(CellValue::Float)
            .unwrap_or(CellValue::Empty)
    } else if cell.is_bool() {
        cell.get_bool()
            .map(CellValue::Bool)
            .unwrap_or(CellValue::Empty)
    } else if let Some(s) = cell.get_string() {
        CellValue::Text(s.to_string())
    } else {
        CellValue::Text(cell.as_string().unwrap_or_else(|| format!("{}", cell)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupted_bytes_fail_with_cause() {
        let err = decode(b"definitely not a spreadsheet").unwrap_err();
        match err {
            AppError::Processing(msg) => {
                assert!(msg.starts_with("Failed to open workbook:"));
                // The underlying library failure must survive into the message.
                assert!(msg.len() > "Failed to open workbook: ".len());
            }
            other => panic!("expected Processing error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_bytes_fail() {
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_convert_cell_kinds() {
        assert_eq!(convert_cell(&Data::Int(5)), CellValue::Int(5));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            convert_cell(&Data::String("hi".to_string())),
            CellValue::Text("hi".to_string())
        );
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
    }
}
