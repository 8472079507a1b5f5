//! Student roster reader using calamine

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::{CertError, Result};

pub mod row;

pub use row::{CellValue, Roster, RosterRow};

/// Read a sheet of a workbook into a roster.
///
/// The first row of the sheet's used range is the header. Columns are not
/// validated here; a missing column is reported when a row is accessed.
pub fn read_roster<P: AsRef<Path>>(path: P, sheet: &str) -> Result<Roster> {
    let path = path.as_ref();
    let roster_error = |message: String| CertError::Roster {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| roster_error(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|name| name == sheet) {
        return Err(roster_error(format!(
            "Worksheet '{}' not found (available: {})",
            sheet,
            sheet_names.join(", ")
        )));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| roster_error(e.to_string()))?;
    let roster = parse_roster(sheet, &range);

    debug!(
        sheet,
        columns = ?roster.columns,
        rows = roster.len(),
        "Roster loaded from {}",
        path.display()
    );
    Ok(roster)
}

/// Build a roster from a calamine range
pub fn parse_roster(sheet: &str, range: &Range<Data>) -> Roster {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Roster {
            sheet: sheet.to_string(),
            ..Roster::default()
        };
    };

    let first_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match parse_cell_value(cell) {
            CellValue::Empty => format!("Unnamed: {}", first_col + i),
            value => value.to_text(),
        })
        .collect();

    let rows = rows
        .enumerate()
        .map(|(index, cells)| {
            let mut values = HashMap::with_capacity(columns.len());
            for (column, cell) in columns.iter().zip(cells) {
                // Duplicate header names keep the first column
                values
                    .entry(column.clone())
                    .or_insert_with(|| parse_cell_value(cell));
            }
            RosterRow::new(index, values)
        })
        .collect();

    Roster {
        sheet: sheet.to_string(),
        columns,
        rows,
    }
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
