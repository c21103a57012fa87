use std::{
    fs,
    path::{Path, PathBuf},
};

use getset::Getters;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Error, Result,
    fs::{config_dir, data_dir},
};

const CURRENT_CONFIG_VERSION: u16 = 1;
const FILE_NAME: &str = "core.toml";
const DATA_FILE_NAME: &str = "entries.json";

/// The backend's core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CoreConfig {
    #[getset(get = "pub")]
    version: u16,
    /// Where entries are stored
    #[getset(get = "pub")]
    data_file: PathBuf,
}

impl CoreConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            data_file: data_file.into(),
        }
    }

    /// Load the configuration from the user's config directory, writing the defaults there
    /// first if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(FILE_NAME);

        if path.exists() {
            Self::read(&path, || Ok(Self::new(data_dir()?.join(DATA_FILE_NAME))))
        } else {
            let cfg = Self::new(data_dir()?.join(DATA_FILE_NAME));
            cfg.write(&path)?;
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.write(&config_dir()?.join(FILE_NAME))
    }

    /// Read a configuration file, falling back to `default` if it can't be parsed.
    fn read<F>(path: &Path, default: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Self>,
    {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        match toml::from_str(&contents) {
            Ok(cfg) => Ok(cfg),
            Err(err) => {
                warn!(
                    "Ignoring malformed configuration at {}: {err}",
                    path.display()
                );
                default()
            }
        }
    }

    fn write(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        fs::write(path, contents).map_err(|e| Error::io(path, e))
    }
}
