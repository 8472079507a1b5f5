//! Roster data structures

use std::collections::HashMap;

use crate::error::{CertError, Result};

/// Rows of one roster sheet, in sheet order
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub sheet: String,
    /// Header names in column order
    pub columns: Vec<String>,
    pub rows: Vec<RosterRow>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One data row, keyed by header name
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    /// 0-based position among the data rows (the header is not counted)
    pub index: usize,
    values: HashMap<String, CellValue>,
}

impl RosterRow {
    pub fn new(index: usize, values: HashMap<String, CellValue>) -> Self {
        Self { index, values }
    }

    /// Get the value of a column, failing if the header has no such column
    pub fn get(&self, column: &str) -> Result<&CellValue> {
        self.values.get(column).ok_or_else(|| CertError::Schema {
            column: column.to_string(),
        })
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Empty cells, empty text, `false`, zero and error cells carry no usable value.
    /// Whitespace-only text is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty | CellValue::Error(_) => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Boolean(b) => !b,
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }

    /// Render the value as display text; whole numbers print without a fraction
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }
}
