//! TOML configuration.
//!
//! ```toml
//! [store]
//! backend = "json"        # or "sqlite"
//! path = "figures.json"   # relative paths resolve against the config file
//!
//! [defaults]
//! scope = "all"
//! sort = "name:ascending"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every section and field is optional. Files are layered: the user file
//! (`~/.stash/config.toml`) first, then the project file
//! (`<root>/.stash/config.toml`), each overriding only the fields it sets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::memory_store::MemoryItemStore;
use crate::query::{Scope, SortSpec};
use crate::store::{ItemGateway, StoreError};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Invalid value for {field}: {value}")]
    Invalid { field: String, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// A JSON collection export loaded into memory.
    #[default]
    Json,
    /// A SQLite database (requires the `sqlite` feature).
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Json,
            path: PathBuf::from("figures.json"),
        }
    }
}

impl StoreConfig {
    /// Open the configured store as a gateway.
    pub fn open(&self) -> Result<Arc<dyn ItemGateway>, StoreError> {
        match self.backend {
            StoreBackend::Json => Ok(Arc::new(MemoryItemStore::open(&self.path)?)),
            #[cfg(feature = "sqlite")]
            StoreBackend::Sqlite => Ok(Arc::new(crate::sqlite_store::SqliteItemStore::open(
                &self.path,
            )?)),
            #[cfg(not(feature = "sqlite"))]
            StoreBackend::Sqlite => Err(StoreError::Storage(
                "sqlite backend requires the `sqlite` feature".to_string(),
            )),
        }
    }
}

/// Query values used when the caller leaves them out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryDefaults {
    pub scope: Scope,
    pub sort: SortSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub store: StoreConfig,
    pub defaults: QueryDefaults,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Default)]
struct TomlStore {
    backend: Option<String>,
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDefaults {
    scope: Option<String>,
    sort: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlLogging {
    level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    store: TomlStore,
    #[serde(default)]
    defaults: TomlDefaults,
    #[serde(default)]
    logging: TomlLogging,
}

impl CatalogConfig {
    /// Parse a single TOML document over the built-in defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_toml(content, None)?;
        Ok(config)
    }

    /// Load a single file over the built-in defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Layer the user file, then the project file, over the defaults.
    /// Missing files are skipped.
    pub fn load_standard(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(home) = dirs::home_dir() {
            let user_file = home.join(".stash").join("config.toml");
            if user_file.exists() {
                config.merge_file(&user_file)?;
            }
        }

        if let Some(root) = project_root {
            let project_file = root.join(".stash").join("config.toml");
            if project_file.exists() {
                config.merge_file(&project_file)?;
            }
        }

        Ok(config)
    }

    /// Override this config with the fields set in `path`.
    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        self.apply_toml(&content, path.parent())?;
        tracing::debug!("Applied configuration from {:?}", path);
        Ok(())
    }

    fn apply_toml(&mut self, content: &str, base_dir: Option<&Path>) -> Result<(), ConfigError> {
        let toml: TomlConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(backend) = toml.store.backend {
            self.store.backend = parse_backend(&backend)?;
        }
        if let Some(path) = toml.store.path {
            self.store.path = match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            };
        }
        if let Some(scope) = toml.defaults.scope {
            self.defaults.scope = scope.parse().map_err(|_| ConfigError::Invalid {
                field: "defaults.scope".to_string(),
                value: scope.clone(),
            })?;
        }
        if let Some(sort) = toml.defaults.sort {
            self.defaults.sort = sort.parse().map_err(|_| ConfigError::Invalid {
                field: "defaults.sort".to_string(),
                value: sort.clone(),
            })?;
        }
        if let Some(level) = toml.logging.level {
            self.logging.level = level;
        }
        Ok(())
    }
}

fn parse_backend(s: &str) -> Result<StoreBackend, ConfigError> {
    match s.to_lowercase().as_str() {
        "json" | "memory" => Ok(StoreBackend::Json),
        "sqlite" => Ok(StoreBackend::Sqlite),
        _ => Err(ConfigError::Invalid {
            field: "store.backend".to_string(),
            value: s.to_string(),
        }),
    }
}
