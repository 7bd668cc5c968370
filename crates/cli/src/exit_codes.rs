//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `rueda` exit codes.
//! Scripts that drive nightly catalog imports rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args, unreadable file)          |
//! | 3    | Payload is not a readable spreadsheet                |
//! | 4    | No payload supplied (or a zero-byte one)             |
//! | 5    | Import profile failed to parse or validate           |
//! | 6    | Catalog store failure (open, query, write)           |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Map it in `import_exit_code` if it comes from an `ImportError`

use rueda_import::ImportError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable input or output path.
pub const EXIT_USAGE: u8 = 2;

/// The payload could not be decoded as xls/xlsx/xlsb/ods.
/// Nothing was written to the catalog.
pub const EXIT_INVALID_FORMAT: u8 = 3;

/// No payload, or an empty one. The import never started.
pub const EXIT_MISSING_INPUT: u8 = 4;

/// Import profile TOML is malformed or inconsistent.
pub const EXIT_INVALID_PROFILE: u8 = 5;

/// The catalog store failed. Rows reconciled before the failure stay written.
pub const EXIT_STORE: u8 = 6;

/// Map an import error to its exit code.
pub fn import_exit_code(err: &ImportError) -> u8 {
    match err {
        ImportError::MissingInput => EXIT_MISSING_INPUT,
        ImportError::InvalidFormat(_) => EXIT_INVALID_FORMAT,
        ImportError::ConfigParse(_) | ImportError::ConfigValidation(_) => EXIT_INVALID_PROFILE,
        ImportError::Store(_) => EXIT_STORE,
    }
}
