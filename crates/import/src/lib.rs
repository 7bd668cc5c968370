//! `rueda-import`: spreadsheet-driven catalog upsert.
//!
//! Reads product rows from a workbook and reconciles them into a
//! [`RecordStore`]: products by name, attributes by name, values by
//! (attribute, name), and one link per (product, attribute) whose value set
//! only grows. Re-running the same file changes nothing.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use config::ImportProfile;
pub use engine::{LinkChange, Reconciler};
pub use error::ImportError;
pub use model::ImportRow;

use rueda_store::RecordStore;

/// Import one uploaded workbook into `store`.
///
/// Nothing is returned; the effect is the store's new state. Decoding happens
/// before any write, so a malformed payload leaves the store untouched. A
/// store failure mid-run keeps the rows already reconciled.
pub fn import_file<S: RecordStore + ?Sized>(
    store: &mut S,
    profile: &ImportProfile,
    import_file: Option<&[u8]>,
) -> Result<(), ImportError> {
    let bytes = match import_file {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ImportError::MissingInput),
    };
    profile.validate()?;

    let table = rueda_io::decode(bytes, &profile.decode_options())?;
    log::info!(
        "importing '{}' with profile '{}': {} data row(s)",
        table.sheet_name,
        profile.name,
        table.rows.len()
    );

    let mut reconciler = Reconciler::new(store, profile)?;
    reconciler.run(&table.rows)
}

/// Same as [`import_file`] for a base64-encoded payload.
pub fn import_base64_file<S: RecordStore + ?Sized>(
    store: &mut S,
    profile: &ImportProfile,
    import_file: Option<&[u8]>,
) -> Result<(), ImportError> {
    let encoded = match import_file {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ImportError::MissingInput),
    };
    let decoded = rueda_io::payload::decode_base64(encoded)?;
    self::import_file(store, profile, Some(&decoded))
}
