//! Whole-collection export and import.

use crate::EntryCodec;
use crate::transfer::create_and_fill;
use folio_core::ContentKind;
use folio_error::FolioResult;
use folio_storage::{Locator, StorageBackend};
use std::io::Cursor;
use std::sync::Arc;

/// Writes an entry collection to one file beneath the root and reads it back.
///
/// A failed write deletes the partly written file, so a failed export leaves
/// nothing behind. The backend offers no rename, so the file is written in
/// place rather than through a temporary.
///
/// # Example
///
/// ```
/// use folio_core::{DiaryEntry, ExportSettings};
/// use folio_diary::ExportImportService;
/// use folio_storage::MemoryBackend;
/// use std::sync::Arc;
///
/// let service = ExportImportService::json(Arc::new(MemoryBackend::new("diary")), &ExportSettings::default());
/// let entries = vec![DiaryEntry::builder().id(1).text("hello").build().unwrap()];
///
/// let locator = service.export("backup.json", &entries).unwrap();
/// assert_eq!(service.import(&locator).unwrap(), entries);
/// ```
#[derive(Debug)]
pub struct ExportImportService<C> {
    backend: Arc<dyn StorageBackend>,
    codec: C,
}

impl<C: EntryCodec> ExportImportService<C> {
    /// Create a service writing through `codec`.
    pub fn new(backend: Arc<dyn StorageBackend>, codec: C) -> Self {
        Self { backend, codec }
    }

    /// The codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Export the whole collection to a new structured-text file.
    ///
    /// Returns the locator of the written file, whose stored name may carry a
    /// duplicate suffix.
    ///
    /// # Errors
    ///
    /// Encoding errors (nothing is created), backend refusals, or a partial
    /// write (the file is deleted).
    #[tracing::instrument(skip(self, entries), fields(entries = entries.len()))]
    pub fn export(&self, filename: &str, entries: &[C::Entry]) -> FolioResult<Locator> {
        let text = self.codec.encode(entries)?;
        let mut reader = Cursor::new(text.into_bytes());
        let document = create_and_fill(
            self.backend.as_ref(),
            ContentKind::StructuredText,
            filename,
            &mut reader,
        )?;

        tracing::info!(stored = %document.name(), "Exported entries");
        Ok(document.locator().clone())
    }

    /// Import a whole collection, in stored order.
    ///
    /// # Errors
    ///
    /// `NotFound` or `AccessDenied` if the file cannot be opened, which is
    /// distinct from an export of zero entries. Malformed content is a JSON
    /// error.
    #[tracing::instrument(skip(self), fields(locator = %locator))]
    pub fn import(&self, locator: &Locator) -> FolioResult<Vec<C::Entry>> {
        let mut reader = self.backend.open_read(locator)?;
        let entries = self.codec.decode(&mut reader)?;
        tracing::info!(entries = entries.len(), "Imported entries");
        Ok(entries)
    }
}

impl ExportImportService<crate::JsonCodec<folio_core::DiaryEntry>> {
    /// JSON service for diary entries.
    pub fn json(backend: Arc<dyn StorageBackend>, settings: &folio_core::ExportSettings) -> Self {
        Self::new(backend, crate::JsonCodec::new(*settings.pretty()))
    }
}
