// Blank import template

use rust_xlsxwriter::{Format, Workbook};

use crate::error::SheetError;

/// Build an `.xlsx` with a bold header row: one `(column, title)` per mapped column.
pub fn write_template(headers: &[(usize, String)]) -> Result<Vec<u8>, SheetError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook
        .add_worksheet()
        .set_name("Products")
        .map_err(|e| SheetError::Write(e.to_string()))?;

    for (col, title) in headers {
        let col = u16::try_from(*col)
            .map_err(|_| SheetError::Write(format!("column {col} is out of range")))?;
        worksheet
            .write_string_with_format(0, col, title, &bold)
            .map_err(|e| SheetError::Write(format!("header '{title}': {e}")))?;
        worksheet
            .set_column_width(col, (title.chars().count() + 4).max(12) as f64)
            .map_err(|e| SheetError::Write(e.to_string()))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| SheetError::Write(e.to_string()))?;

    workbook.save_to_buffer().map_err(|e| SheetError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{decode, DecodeOptions};
    use crate::Cell;

    #[test]
    fn template_header_row_decodes_back() {
        let headers = vec![
            (0, "Referencia".to_string()),
            (2, "Nombre".to_string()),
            (3, "Carga".to_string()),
        ];
        let bytes = write_template(&headers).unwrap();

        let table = decode(&bytes, &DecodeOptions { sheet: 0, header_rows: 0 }).unwrap();
        assert_eq!(table.sheet_name, "Products");
        assert_eq!(table.rows.len(), 1);
        let header = &table.rows[0];
        assert_eq!(header.cell(0), &Cell::Text("Referencia".into()));
        assert_eq!(header.cell(1), &Cell::Empty);
        assert_eq!(header.cell(3), &Cell::Text("Carga".into()));

        // Default options skip that header and leave nothing.
        assert!(decode(&bytes, &DecodeOptions::default()).unwrap().rows.is_empty());
    }
}
