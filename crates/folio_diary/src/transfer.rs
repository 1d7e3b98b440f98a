//! Create-then-fill with rollback, shared by attachments and exports.

use folio_core::ContentKind;
use folio_error::{FolioResult, StorageError};
use folio_storage::{Document, Locator, StorageBackend};
use std::io::{self, Read, Write};

/// Create `name` and stream `reader` into it.
///
/// If anything fails after the file was created, the file is deleted before
/// the error is returned. The writer is always dropped before that delete.
pub(crate) fn create_and_fill(
    backend: &dyn StorageBackend,
    kind: ContentKind,
    name: &str,
    reader: &mut dyn Read,
) -> FolioResult<Document> {
    let document = backend.create_file(kind, name)?;

    match fill(backend, document.locator(), reader) {
        Ok(bytes) => {
            tracing::debug!(stored = %document.name(), bytes, "Filled document");
            Ok(document)
        }
        Err(e) => {
            let rolled_back = backend.delete(document.locator());
            tracing::warn!(
                stored = %document.name(),
                rolled_back,
                error = %e,
                "Write failed, rolled back created document"
            );
            Err(e)
        }
    }
}

fn fill(backend: &dyn StorageBackend, locator: &Locator, reader: &mut dyn Read) -> FolioResult<u64> {
    let mut writer = backend.open_write(locator)?;
    let bytes = io::copy(reader, &mut writer)
        .map_err(|e| StorageError::partial_io(format!("copy into {}: {}", locator, e)))?;
    writer
        .flush()
        .map_err(|e| StorageError::partial_io(format!("flush {}: {}", locator, e)))?;
    Ok(bytes)
}
