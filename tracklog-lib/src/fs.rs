use std::{fs::create_dir_all, path::PathBuf};

use xdg::BaseDirectories;

use crate::{Error, Result};

/// Returns the path to the Tracklog configuration directory. If it doesn't exist when this
/// function is called, it will be created.
pub fn config_dir() -> Result<PathBuf> {
    ensure_dir(xdg_prefix().get_config_home())
}

/// Returns the path to the Tracklog data directory. If it doesn't exist when this function is
/// called, it will be created.
pub fn data_dir() -> Result<PathBuf> {
    ensure_dir(xdg_prefix().get_data_home())
}

fn ensure_dir(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.ok_or(Error::NoHomeDir)?;

    create_dir_all(&path).map_err(|e| Error::io(&path, e))?;

    Ok(path)
}

fn xdg_prefix() -> BaseDirectories {
    BaseDirectories::with_prefix("tracklog")
}
