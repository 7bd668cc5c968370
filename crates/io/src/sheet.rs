// Workbook bytes -> rows of typed cells

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};

use crate::cell::Cell;
use crate::error::SheetError;

static EMPTY: Cell = Cell::Empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Worksheet index, 0-based.
    pub sheet: usize,
    /// Leading worksheet rows to skip (counted from row 1, not from the first used row).
    pub header_rows: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { sheet: 0, header_rows: 1 }
    }
}

/// A data row. `cells[0]` is always column A.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based worksheet row number, for messages.
    pub line: usize,
    pub cells: Vec<Cell>,
}

impl SheetRow {
    /// Cell at `col`, or `Cell::Empty` past the end of the row.
    pub fn cell(&self, col: usize) -> &Cell {
        self.cells.get(col).unwrap_or(&EMPTY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub sheet_name: String,
    pub rows: Vec<SheetRow>,
}

/// Decode an in-memory workbook (xls, xlsx, xlsb or ods, detected from content).
///
/// Rows come back in worksheet order with header rows removed. The used range
/// may start below or right of A1; cells are re-anchored so column indices are
/// absolute.
pub fn decode(bytes: &[u8], options: &DecodeOptions) -> Result<Table, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| SheetError::Open(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .get(options.sheet)
        .cloned()
        .ok_or(SheetError::MissingSheet { index: options.sheet, available: sheet_names.len() })?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| SheetError::Read {
        sheet: sheet_name.clone(),
        detail: e.to_string(),
    })?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let lead = start_col as usize;

    let mut rows = Vec::with_capacity(range.height());
    for (idx, data) in range.rows().enumerate() {
        let row = start_row as usize + idx;
        if row < options.header_rows {
            continue;
        }
        let mut cells = Vec::with_capacity(lead + data.len());
        cells.resize(lead, Cell::Empty);
        cells.extend(data.iter().map(Cell::from));
        rows.push(SheetRow { line: row + 1, cells });
    }

    log::debug!("decoded sheet '{}': {} data row(s)", sheet_name, rows.len());
    Ok(Table { sheet_name, rows })
}
