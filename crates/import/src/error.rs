use std::fmt;

use rueda_io::SheetError;
use rueda_store::StoreError;

#[derive(Debug)]
pub enum ImportError {
    /// No payload supplied (or a zero-byte one). The run never starts.
    MissingInput,
    /// Payload could not be decoded as a spreadsheet.
    InvalidFormat(String),
    /// TOML parse / deserialization error in the import profile.
    ConfigParse(String),
    /// Import profile is well-formed but inconsistent (column clash, blank name).
    ConfigValidation(String),
    /// Record store failure while reconciling; earlier rows stay written.
    Store(StoreError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => write!(f, "please select an Excel file to import"),
            Self::InvalidFormat(detail) => {
                write!(f, "invalid file format, only .xls or .xlsx files allowed ({detail})")
            }
            Self::ConfigParse(msg) => write!(f, "profile parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "profile validation error: {msg}"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<SheetError> for ImportError {
    fn from(e: SheetError) -> Self {
        Self::InvalidFormat(e.to_string())
    }
}
