// `rueda import` - reconcile one workbook into the catalog.

use std::path::{Path, PathBuf};

use rueda_import::{ImportError, ImportProfile};
use rueda_store::{CatalogCounts, RecordStore};

use crate::exit_codes::import_exit_code;
use crate::util::{catalog_path, load_profile, open_catalog};
use crate::CliError;

pub(crate) fn cmd_import(
    file: Option<PathBuf>,
    catalog: Option<PathBuf>,
    profile: Option<PathBuf>,
    base64: bool,
) -> Result<(), CliError> {
    let payload = match &file {
        Some(path) => read_payload(path)?,
        None => Vec::new(),
    };
    // Checked before the catalog is opened so nothing is created on disk
    if payload.is_empty() {
        let e = ImportError::MissingInput;
        return Err(CliError::new(import_exit_code(&e), e.to_string()));
    }

    let profile = load_profile(profile.as_deref())?;
    let catalog = catalog_path(catalog);
    let mut store = open_catalog(&catalog)?;

    let created = run_import(&mut store, &profile, &payload, base64)?;
    println!("imported into {}: {}", catalog.display(), summary(&created));
    Ok(())
}

/// Import `payload` and return the records it created.
///
/// Partial progress is kept on failure, so the error carries it as a hint.
fn run_import<S: RecordStore + ?Sized>(
    store: &mut S,
    profile: &ImportProfile,
    payload: &[u8],
    base64: bool,
) -> Result<CatalogCounts, CliError> {
    let before = store.counts().map_err(|e| CliError::store(e.to_string()))?;
    let result = if base64 {
        rueda_import::import_base64_file(&mut *store, profile, Some(payload))
    } else {
        rueda_import::import_file(&mut *store, profile, Some(payload))
    };
    let after = store.counts().map_err(|e| CliError::store(e.to_string()))?;
    let created = after.since(&before);

    if let Err(e) = result {
        let mut err = CliError::new(import_exit_code(&e), e.to_string());
        if created != CatalogCounts::default() {
            err = err.with_hint(format!("records created before the failure: {}", summary(&created)));
        }
        return Err(err);
    }
    Ok(created)
}

fn read_payload(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path)
        .map_err(|e| CliError::args(format!("cannot read {}: {}", path.display(), e)))
}

fn summary(created: &CatalogCounts) -> String {
    format!(
        "{} product(s), {} attribute(s), {} value(s), {} link(s) created",
        created.products, created.attributes, created.values, created.links
    )
}
