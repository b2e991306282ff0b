use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to open workbook: {0}")]
    Open(#[from] calamine::Error),
    #[error("workbook contains no sheets")]
    NoSheets,
}

/// Decode the first worksheet of a spreadsheet file into rows of cells.
///
/// Format detection (xlsx/xls/ods) is delegated to calamine. Cells come back
/// as `Option<String>`: `None` for empty cells, otherwise the text a
/// spreadsheet UI would show for the value.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<Option<String>>>, SheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoSheets)??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Render a cell as the text the user saw in their spreadsheet editor.
/// Integral floats print without the trailing `.0` (Excel stores `4` as 4.0).
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
