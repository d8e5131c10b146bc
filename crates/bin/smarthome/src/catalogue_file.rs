//! Catalogue file — the type registry's configuration source on disk.

use std::path::{Path, PathBuf};

use smarthome_domain::error::ConfigError;
use smarthome_domain::registry::{CatalogueSource, TypeCatalogue};

/// A TOML file with top-level `sensor` and `actuator` string arrays.
#[derive(Debug, Clone)]
pub struct FileCatalogue {
    path: PathBuf,
}

impl FileCatalogue {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogueSource for FileCatalogue {
    fn read_catalogue(&self) -> Result<TypeCatalogue, ConfigError> {
        let content = std::fs::read_to_string(&self.path).map_err(|err| {
            tracing::error!(path = %self.path.display(), error = %err, "cannot read catalogue");
            ConfigError::Unavailable(Box::new(err))
        })?;
        toml::from_str(&content).map_err(|err| ConfigError::Unavailable(Box::new(err)))
    }
}
