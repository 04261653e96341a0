// ============================================================
// CELL VALUES
// ============================================================
// The closed set of value kinds a decoded table cell can hold

use serde_json::Value;

/// A single decoded table cell.
///
/// Decoders normalize every cell into one of these variants; downstream code
/// matches on the variant instead of re-inspecting raw content.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Empty,
}

impl CellValue {
    /// Whether the cell decoded as a numeric kind.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }

    /// Coerce the cell to a finite number, if it has one.
    ///
    /// Non-finite floats and text that does not parse as a finite number
    /// yield `None`; callers decide what to do with the failures.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) if f.is_finite() => Some(*f),
            CellValue::Float(_) => None,
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            CellValue::Bool(_) | CellValue::Empty => None,
        }
    }

    /// Map the cell to a value guaranteed representable in JSON.
    ///
    /// NaN and ±infinity become the integer 0; everything else keeps its
    /// decoded type. Total: every outward-bound cell passes through here.
    pub fn json_safe(&self) -> Value {
        match self {
            CellValue::Float(f) if !f.is_finite() => Value::from(0),
            CellValue::Float(f) => Value::from(*f),
            CellValue::Int(i) => Value::from(*i),
            CellValue::Bool(b) => Value::from(*b),
            CellValue::Text(s) => Value::from(s.as_str()),
            CellValue::Empty => Value::Null,
        }
    }
}
