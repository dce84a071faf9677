use crate::api::CardzApi;
use crate::config::CardzConfig;
use crate::error::{CardzError, Result};
use crate::store::fs::FileStore;
use crate::store::RecordStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable that points cardz at a data directory.
pub const DIR_ENV: &str = "CARDZ_DIR";

pub struct CardzContext {
    pub api: CardzApi<FileStore>,
    pub config: CardzConfig,
}

/// Pick the data directory: an explicit path wins, then `CARDZ_DIR`, then the
/// platform data directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "cardz", "cardz")
        .ok_or_else(|| CardzError::Store("Could not determine data dir".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub fn initialize(explicit_dir: Option<&Path>) -> Result<CardzContext> {
    let data_dir = resolve_data_dir(explicit_dir)?;
    let config = CardzConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        CardzConfig::default()
    });
    let store = FileStore::new(data_dir.clone());
    tracing::debug!(location = %store.location(), "using data directory");
    let api = CardzApi::new(store, data_dir);

    Ok(CardzContext { api, config })
}
