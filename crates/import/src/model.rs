use rueda_io::SheetRow;
use rueda_store::NewProduct;

use crate::config::{ImportProfile, ProductDefaults};

/// A non-blank attribute cell of an input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedValue {
    pub column: usize,
    pub attribute: String,
    pub value: String,
}

/// One worksheet row read through the profile's column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub line: usize,
    pub code: Option<String>,
    pub barcode: Option<String>,
    /// `None` marks the end-of-data sentinel.
    pub name: Option<String>,
    pub description: Option<String>,
    /// Blank cells are already dropped; order follows the profile mapping.
    pub values: Vec<MappedValue>,
}

impl ImportRow {
    pub fn from_sheet_row(row: &SheetRow, profile: &ImportProfile) -> Self {
        let layout = &profile.columns;
        let values = profile
            .attributes
            .iter()
            .filter_map(|attr| {
                row.cell(attr.column).value().map(|value| MappedValue {
                    column: attr.column,
                    attribute: attr.name.clone(),
                    value,
                })
            })
            .collect();

        Self {
            line: row.line,
            code: row.cell(layout.code).value(),
            barcode: row.cell(layout.barcode).value(),
            name: row.cell(layout.name).value(),
            description: row.cell(layout.description).value(),
            values,
        }
    }

    /// Fields for creating this row's product. `None` for a sentinel row.
    pub fn new_product(&self, defaults: &ProductDefaults) -> Option<NewProduct> {
        let name = self.name.clone()?;
        Some(NewProduct {
            name,
            code: self.code.clone(),
            barcode: self.barcode.clone(),
            description: self.description.clone(),
            detailed_type: defaults.detailed_type,
            invoice_policy: defaults.invoice_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rueda_io::Cell;

    fn sheet_row(cells: Vec<Cell>) -> SheetRow {
        SheetRow { line: 2, cells }
    }

    #[test]
    fn reads_fixed_columns_and_drops_blank_values() {
        let profile = ImportProfile::default();
        let mut cells = vec![Cell::Empty; 17];
        cells[0] = Cell::from("P1");
        cells[1] = Cell::Number(111222.0);
        cells[2] = Cell::from("Tire A");
        cells[3] = Cell::Number(91.0);
        cells[4] = Cell::from("V");
        cells[5] = Cell::Bool(false);
        cells[6] = Cell::Number(0.0);
        cells[16] = Cell::from("All-season");

        let row = ImportRow::from_sheet_row(&sheet_row(cells), &profile);
        assert_eq!(row.code.as_deref(), Some("P1"));
        assert_eq!(row.barcode.as_deref(), Some("111222"));
        assert_eq!(row.name.as_deref(), Some("Tire A"));
        assert_eq!(row.description.as_deref(), Some("All-season"));
        assert_eq!(
            row.values,
            vec![
                MappedValue { column: 3, attribute: "Carga".into(), value: "91".into() },
                MappedValue { column: 4, attribute: "Velocidad".into(), value: "V".into() },
            ]
        );
    }

    #[test]
    fn short_row_has_no_description_or_values() {
        let profile = ImportProfile::default();
        let row = ImportRow::from_sheet_row(
            &sheet_row(vec![Cell::from("P1"), Cell::Empty, Cell::from("Tire A")]),
            &profile,
        );
        assert_eq!(row.barcode, None);
        assert_eq!(row.description, None);
        assert!(row.values.is_empty());
    }

    #[test]
    fn blank_name_yields_no_product() {
        let profile = ImportProfile::default();
        let row = ImportRow::from_sheet_row(&sheet_row(vec![Cell::from("P1")]), &profile);
        assert_eq!(row.name, None);
        assert!(row.new_product(&profile.product).is_none());
    }
}
