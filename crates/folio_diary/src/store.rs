//! One root, one attachment manager, one export service.

use crate::{AttachmentManager, ExportImportService, JsonCodec};
use derive_getters::Getters;
use folio_core::{DiaryEntry, FolioConfig, RootLocation};
use folio_error::FolioResult;
use folio_storage::{FileSystemBackend, StorageBackend};
use std::sync::Arc;

/// Attachment manager and JSON export service sharing one backend.
///
/// # Example
///
/// ```no_run
/// use folio_core::FolioConfig;
/// use folio_diary::DiaryStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FolioConfig::load()?;
/// let store = DiaryStore::from_config(&config)?;
/// let placeholder = store.attachments().create_dummy("img_20240301_083000.jpg")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Getters)]
pub struct DiaryStore {
    /// Attachment lifecycle
    attachments: AttachmentManager,
    /// Whole-collection export and import
    exports: ExportImportService<JsonCodec<DiaryEntry>>,
}

impl DiaryStore {
    /// Open the root configured in `config` on the local filesystem.
    ///
    /// # Errors
    ///
    /// A configuration error if no root is configured or the root does not
    /// exist. Both are fatal for the host.
    pub fn from_config(config: &FolioConfig) -> FolioResult<Self> {
        let root = config.require_root()?.clone();
        Self::open(root, config)
    }

    /// Open a root granted by the host on the local filesystem.
    #[tracing::instrument(skip(root, config), fields(handle = %root.handle(), prefix = %root.prefix()))]
    pub fn open(root: RootLocation, config: &FolioConfig) -> FolioResult<Self> {
        let backend = FileSystemBackend::new(root, config.storage())?;
        Ok(Self::with_backend(Arc::new(backend), config))
    }

    /// Wire both services onto an existing backend.
    pub fn with_backend(backend: Arc<dyn StorageBackend>, config: &FolioConfig) -> Self {
        Self {
            attachments: AttachmentManager::from_settings(Arc::clone(&backend), config.cache()),
            exports: ExportImportService::json(backend, config.export()),
        }
    }
}
