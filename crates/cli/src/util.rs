use std::path::{Path, PathBuf};

use rueda_import::ImportProfile;
use rueda_store::SqliteStore;

use crate::exit_codes::import_exit_code;
use crate::CliError;

const APP_DIR: &str = "rueda";

/// `<data_dir>/rueda/catalog.db`, falling back to the working directory when
/// the platform has no data directory.
pub(crate) fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_default()
        .join("catalog.db")
}

/// `<config_dir>/rueda/profile.toml`, if the platform has a config directory.
pub(crate) fn default_profile_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("profile.toml"))
}

/// Load the effective import profile.
///
/// An explicit path must exist. Without one, the per-user profile is used when
/// present, otherwise the built-in tyre layout.
pub(crate) fn load_profile(explicit: Option<&Path>) -> Result<ImportProfile, CliError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_profile_path().filter(|p| p.is_file()) {
            Some(p) => p,
            None => {
                log::debug!("no profile file, using built-in profile");
                return Ok(ImportProfile::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|e| CliError::args(format!("cannot read profile {}: {}", path.display(), e)))?;
    let profile = ImportProfile::from_toml(&text).map_err(|e| {
        CliError::new(import_exit_code(&e), format!("{}: {}", path.display(), e))
    })?;
    log::info!("loaded profile '{}' from {}", profile.name, path.display());
    Ok(profile)
}

/// Open (creating if needed) the SQLite catalog at `path`.
pub(crate) fn open_catalog(path: &Path) -> Result<SqliteStore, CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::store(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    SqliteStore::open(path).map_err(|e| {
        CliError::store(format!("cannot open catalog {}: {}", path.display(), e))
    })
}

/// Resolve the catalog path from the flag or the default.
pub(crate) fn catalog_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(default_catalog_path)
}
