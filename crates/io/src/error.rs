use std::fmt;

#[derive(Debug)]
pub enum SheetError {
    /// Bytes are not a workbook calamine can open.
    Open(String),
    /// Requested worksheet index does not exist.
    MissingSheet { index: usize, available: usize },
    /// Worksheet exists but its cells could not be read.
    Read { sheet: String, detail: String },
    /// Payload is not valid base64.
    Base64(String),
    /// Writing a workbook failed.
    Write(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(msg) => write!(f, "cannot open workbook: {msg}"),
            Self::MissingSheet { index, available } => {
                write!(f, "worksheet #{index} not found (workbook has {available})")
            }
            Self::Read { sheet, detail } => write!(f, "cannot read sheet '{sheet}': {detail}"),
            Self::Base64(msg) => write!(f, "payload is not valid base64: {msg}"),
            Self::Write(msg) => write!(f, "cannot write workbook: {msg}"),
        }
    }
}

impl std::error::Error for SheetError {}
