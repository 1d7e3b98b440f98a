//! Attachment lifecycle on top of a storage backend and a locator cache.

use crate::transfer::create_and_fill;
use derive_getters::Getters;
use folio_cache::ResourceLocatorCache;
use folio_core::{CacheSettings, ContentKind};
use folio_error::FolioResult;
use folio_storage::{Document, Locator, StorageBackend};
use std::sync::Arc;

/// What a host needs to offer an attachment to another process.
///
/// Folio stops at producing this value; presenting it is up to the host.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ShareReference {
    /// Locator of the shared file
    locator: Locator,
    /// Whether the receiver must be granted read access
    read_grant: bool,
    /// MIME type to advertise
    mime_type: &'static str,
}

/// Manages photo attachments beneath one storage root.
///
/// Every operation reports backend refusals as errors and never panics. Files
/// created under exactly the requested name seed the locator cache.
///
/// # Example
///
/// ```
/// use folio_cache::ResourceLocatorCache;
/// use folio_diary::AttachmentManager;
/// use folio_storage::MemoryBackend;
/// use std::sync::Arc;
///
/// let backend = Arc::new(MemoryBackend::new("diary"));
/// let source = backend.add_source(b"jpeg bytes".to_vec());
/// let manager = AttachmentManager::new(backend.clone(), ResourceLocatorCache::unbounded());
///
/// let locator = manager.copy_in(&source, "img_0001.jpg").unwrap();
/// assert_eq!(manager.resolve("img_0001.jpg").unwrap(), locator);
/// assert_eq!(backend.contents("img_0001.jpg").unwrap(), b"jpeg bytes");
/// ```
#[derive(Debug)]
pub struct AttachmentManager {
    backend: Arc<dyn StorageBackend>,
    cache: ResourceLocatorCache,
    invalidate_on_delete: bool,
}

impl AttachmentManager {
    /// Create a manager owning `cache`.
    pub fn new(backend: Arc<dyn StorageBackend>, cache: ResourceLocatorCache) -> Self {
        tracing::debug!(backend = backend.backend_name(), "Creating attachment manager");
        Self {
            backend,
            cache,
            invalidate_on_delete: false,
        }
    }

    /// Create a manager with a cache built from configuration.
    pub fn from_settings(backend: Arc<dyn StorageBackend>, settings: &CacheSettings) -> Self {
        Self::new(backend, ResourceLocatorCache::from_settings(settings))
            .with_invalidate_on_delete(*settings.invalidate_on_delete())
    }

    /// Forget a filename's cached locator when [`delete`](Self::delete) is called.
    ///
    /// Off by default: a deleted filename keeps resolving to its old locator.
    pub fn with_invalidate_on_delete(mut self, enabled: bool) -> Self {
        self.invalidate_on_delete = enabled;
        self
    }

    /// The backend this manager writes to.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// The locator cache owned by this manager.
    pub fn cache(&self) -> &ResourceLocatorCache {
        &self.cache
    }

    /// Create an empty image placeholder ahead of a pending capture.
    ///
    /// # Errors
    ///
    /// Any refusal by the backend, including a duplicate under
    /// [`DuplicatePolicy::Reject`](folio_core::DuplicatePolicy::Reject).
    #[tracing::instrument(skip(self))]
    pub fn create_dummy(&self, filename: &str) -> FolioResult<Locator> {
        let document = self.backend.create_file(ContentKind::Image, filename)?;
        tracing::info!(stored = %document.name(), "Created attachment placeholder");
        Ok(self.remember(filename, document))
    }

    /// Copy the bytes behind `source` into a new image attachment.
    ///
    /// The source is opened first; if that fails nothing is created. If the
    /// new file cannot be opened for writing or the copy fails part way, the new
    /// file is deleted before the error is returned.
    #[tracing::instrument(skip(self), fields(source = %source))]
    pub fn copy_in(&self, source: &Locator, filename: &str) -> FolioResult<Locator> {
        let mut reader = self.backend.open_read(source)?;
        let document = create_and_fill(self.backend.as_ref(), ContentKind::Image, filename, &mut reader)?;
        tracing::info!(stored = %document.name(), "Copied attachment");
        Ok(self.remember(filename, document))
    }

    /// Delete an attachment by filename.
    ///
    /// Idempotent: an absent filename is silently ignored, as is a backend that
    /// refuses the delete.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, filename: &str) {
        match self.backend.find_file(filename) {
            Ok(document) => {
                let deleted = self.backend.delete(document.locator());
                tracing::info!(deleted, "Deleted attachment");
            }
            Err(e) => tracing::debug!(error = %e, "Nothing to delete"),
        }

        if self.invalidate_on_delete {
            self.cache.invalidate(filename);
        }
    }

    /// Resolve a filename to its locator through the cache.
    pub fn resolve(&self, filename: &str) -> FolioResult<Locator> {
        self.cache.resolve(filename, self.backend.as_ref())
    }

    /// Produce the value a host share dialog needs for an attachment.
    pub fn share_reference(&self, filename: &str) -> FolioResult<ShareReference> {
        Ok(ShareReference {
            locator: self.resolve(filename)?,
            read_grant: true,
            mime_type: ContentKind::Image.mime_type(),
        })
    }

    /// Drop every cached locator.
    pub fn reset_cache(&self) {
        self.cache.clear();
    }

    fn remember(&self, filename: &str, document: Document) -> Locator {
        let locator = document.locator().clone();
        if document.name() != filename {
            tracing::debug!(
                requested = filename,
                stored = %document.name(),
                "Stored under a different name, not caching"
            );
        } else if !self.cache.insert_if_absent(filename, locator.clone()) {
            tracing::debug!(filename, "Filename already cached, keeping earlier locator");
        }
        locator
    }
}
