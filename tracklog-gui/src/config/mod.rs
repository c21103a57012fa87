use std::{fs, path::Path, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;
use tracklog_lib::fs::config_dir;

pub use theme::Theme;

mod theme;

const FILE_NAME: &str = "gui.toml";

/// Handle to the frontend's configuration
pub type Cfg = Arc<RwLock<GuiConfig>>;

/// The frontend's configuration, serialized to TOML.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiConfig {
    pub theme: Theme,
}

impl GuiConfig {
    /// Load the configuration, falling back to defaults when it is missing or unreadable.
    pub fn load() -> Self {
        match config_dir() {
            Ok(dir) => Self::load_from(&dir.join(FILE_NAME)),
            Err(err) => {
                warn!("Using default GUI configuration: {err}");
                Self::default()
            }
        }
    }

    fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|err| {
            warn!("Ignoring malformed {}: {err}", path.display());
            Self::default()
        })
    }

    pub fn save(&self) -> tracklog_lib::Result<()> {
        let path = config_dir()?.join(FILE_NAME);
        let contents = toml::to_string_pretty(self)?;

        fs::write(&path, contents).map_err(|source| tracklog_lib::Error::Io { path, source })
    }

    pub fn theme(&self) -> iced::Theme {
        (&self.theme).into()
    }
}
