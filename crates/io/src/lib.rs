// Spreadsheet I/O for catalog imports

pub mod cell;
pub mod error;
pub mod payload;
pub mod sheet;
pub mod template;

pub use cell::Cell;
pub use error::SheetError;
pub use sheet::{decode, DecodeOptions, SheetRow, Table};
