// Decoding real workbooks produced by rust_xlsxwriter.

use rueda_io::{decode, Cell, DecodeOptions, SheetError};
use rust_xlsxwriter::Workbook;

fn tyre_workbook() -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "code").unwrap();
    ws.write_string(0, 1, "barcode").unwrap();
    ws.write_string(0, 2, "name").unwrap();
    ws.write_string(0, 3, "load").unwrap();

    ws.write_string(1, 0, "P1").unwrap();
    ws.write_number(1, 1, 8412345678901.0).unwrap();
    ws.write_string(1, 2, "Tire A").unwrap();
    ws.write_number(1, 3, 91.0).unwrap();

    ws.write_string(2, 0, "P2").unwrap();
    ws.write_string(2, 2, "Tire B").unwrap();
    ws.write_boolean(2, 3, false).unwrap();
    wb.save_to_buffer().unwrap()
}

#[test]
fn skips_header_and_keeps_types() {
    let table = decode(&tyre_workbook(), &DecodeOptions::default()).unwrap();
    assert_eq!(table.rows.len(), 2);

    let first = &table.rows[0];
    assert_eq!(first.line, 2);
    assert_eq!(first.cell(0).to_text(), "P1");
    assert_eq!(first.cell(1).to_text(), "8412345678901");
    assert_eq!(first.cell(3), &Cell::Number(91.0));

    let second = &table.rows[1];
    assert_eq!(second.line, 3);
    assert!(second.cell(1).is_blank());
    assert!(second.cell(3).is_blank());
}

#[test]
fn used_range_offset_is_reanchored() {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    // Nothing in row 1 or column A.
    ws.write_string(2, 1, "000111222").unwrap();
    ws.write_string(2, 2, "Tire C").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let table = decode(&bytes, &DecodeOptions::default()).unwrap();
    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    assert_eq!(row.line, 3);
    assert_eq!(row.cell(0), &Cell::Empty);
    assert_eq!(row.cell(1).to_text(), "000111222");
    assert_eq!(row.cell(2).to_text(), "Tire C");
}

#[test]
fn selects_sheet_by_index() {
    let mut wb = Workbook::new();
    wb.add_worksheet().set_name("Notes").unwrap().write_string(0, 0, "ignore me").unwrap();
    let ws = wb.add_worksheet().set_name("Data").unwrap();
    ws.write_string(0, 2, "name").unwrap();
    ws.write_string(1, 2, "Tire D").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let table = decode(&bytes, &DecodeOptions { sheet: 1, header_rows: 1 }).unwrap();
    assert_eq!(table.sheet_name, "Data");
    assert_eq!(table.rows[0].cell(2).to_text(), "Tire D");

    let err = decode(&bytes, &DecodeOptions { sheet: 5, header_rows: 1 }).unwrap_err();
    assert!(matches!(err, SheetError::MissingSheet { index: 5, available: 2 }));
}
