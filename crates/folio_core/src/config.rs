//! Configuration for Folio managers and backends.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from folio.toml)
//! - User overrides (./folio.toml or ~/.config/folio/folio.toml)
//! - Automatic merging with user values taking precedence

use crate::{DuplicatePolicy, RootLocation};
use folio_error::{ConfigError, FolioError, FolioResult};
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Locator cache behavior.
///
/// # Example
///
/// ```toml
/// [cache]
/// fast_path_locators = false
/// invalidate_on_delete = false
/// max_entries = 512
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheSettings {
    /// Construct locators from the root's addressing scheme instead of asking the backend
    #[builder(default)]
    #[serde(default)]
    fast_path_locators: bool,

    /// Drop the cache entry for a filename when it is deleted through the manager
    #[builder(default)]
    #[serde(default)]
    invalidate_on_delete: bool,

    /// Bound the cache with LRU eviction; unbounded when absent
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_entries: Option<usize>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            fast_path_locators: false,
            invalidate_on_delete: false,
            max_entries: None,
        }
    }
}

/// Backend behavior.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct StorageSettings {
    /// Policy applied when a created name already exists
    #[builder(default)]
    #[serde(default)]
    duplicate_policy: DuplicatePolicy,

    /// Refuse every create and write, as a revoked grant would
    #[builder(default)]
    #[serde(default)]
    read_only: bool,
}

/// Export formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ExportSettings {
    /// Pretty-print exported JSON
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

/// Top-level Folio configuration.
///
/// The root is normally handed over by the host at runtime; a configured root
/// is a convenience for hosts that persist their grant.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct FolioConfig {
    /// Granted storage root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    root: Option<RootLocation>,

    /// Locator cache settings
    #[serde(default)]
    cache: CacheSettings,

    /// Backend settings
    #[serde(default)]
    storage: StorageSettings,

    /// Export settings
    #[serde(default)]
    export: ExportSettings,
}

impl FolioConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FolioResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> FolioResult<Self> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (folio.toml shipped with the library)
    /// 2. User config in home directory (~/.config/folio/folio.toml)
    /// 3. User config in current directory (./folio.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> FolioResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../folio.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/folio/folio.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("folio").required(false));

        builder
            .build()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FolioError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// The configured root, or a configuration error when none was granted.
    ///
    /// A missing root is a programmer error; callers should not try to recover.
    pub fn require_root(&self) -> FolioResult<&RootLocation> {
        self.root
            .as_ref()
            .ok_or_else(|| ConfigError::new("No storage root configured").into())
    }
}
