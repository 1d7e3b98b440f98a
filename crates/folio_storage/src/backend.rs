//! Storage backend capability trait.

use crate::{Document, Locator};
use folio_core::{ContentKind, DuplicatePolicy};
use folio_error::FolioResult;
use std::fmt;
use std::io::{Read, Write};

/// Capability interface onto one granted storage root.
///
/// This is the only seam that touches real storage. Every call is synchronous,
/// returns as soon as the backend answers and never retries.
pub trait StorageBackend: Send + Sync + fmt::Debug {
    /// Short backend name for logging (e.g., "filesystem", "memory").
    fn backend_name(&self) -> &'static str;

    /// Policy applied by [`create_file`](Self::create_file) when the name is taken.
    fn duplicate_policy(&self) -> DuplicatePolicy;

    /// Request a new, empty file beneath the root.
    ///
    /// The returned [`Document`] carries the name actually stored, which differs
    /// from `name` when the backend auto-suffixes duplicates.
    ///
    /// # Errors
    ///
    /// `AccessDenied`, `InvalidName` or `AlreadyExists` when the backend refuses.
    fn create_file(&self, kind: ContentKind, name: &str) -> FolioResult<Document>;

    /// Look up an existing file by name.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such file exists.
    fn find_file(&self, name: &str) -> FolioResult<Document>;

    /// Open a locator for reading.
    fn open_read(&self, locator: &Locator) -> FolioResult<Box<dyn Read + Send>>;

    /// Open a locator for writing, truncating existing content.
    fn open_write(&self, locator: &Locator) -> FolioResult<Box<dyn Write + Send>>;

    /// Delete the file behind a locator.
    ///
    /// Best effort: returns whether something was deleted.
    fn delete(&self, locator: &Locator) -> bool;

    /// List the files directly beneath the root, ordered by name.
    fn list(&self) -> FolioResult<Vec<Document>>;

    /// Build the locator for `name` from the root's addressing scheme without
    /// asking the backend.
    ///
    /// Returns `None` when the backend has no deterministic scheme. The result
    /// says nothing about whether the file exists.
    fn canonical_locator(&self, _name: &str) -> Option<Locator> {
        None
    }
}
