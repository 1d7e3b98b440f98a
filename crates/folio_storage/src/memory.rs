//! In-memory storage root for deterministic tests.
//!
//! Documents are kept in a name-ordered map. Every creation gets a fresh
//! locator, so a deleted-then-recreated name is a different document. A
//! [`FailurePolicy`] injects refusals and mid-stream failures.

use crate::locator::{DocumentScheme, validate_name};
use crate::{Document, Locator, StorageBackend};
use folio_core::{ContentKind, DuplicatePolicy, RootLocation, StorageSettings};
use folio_error::{BackendError, FolioResult, StorageError, StorageErrorKind};
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Policy for when the in-memory backend should fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Never fail (passthrough)
    #[default]
    Never,
    /// Refuse every create, write and delete
    ReadOnly,
    /// Refuse every create
    DenyCreate,
    /// Refuse every open for reading
    DenyOpenRead,
    /// Refuse every open for writing
    DenyOpenWrite,
    /// Writers fail once they have accepted this many bytes
    FailWriteAfter(usize),
    /// Readers fail once they have produced this many bytes
    FailReadAfter(usize),
}

#[derive(Debug)]
struct StoredDocument {
    id: u64,
    mime_type: String,
    data: Arc<Mutex<Vec<u8>>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: BTreeMap<String, StoredDocument>,
    sources: HashMap<Locator, Vec<u8>>,
    next_id: u64,
    failures: FailurePolicy,
}

impl MemoryState {
    fn by_id(&self, id: u64) -> Option<(&String, &StoredDocument)> {
        self.documents.iter().find(|(_, doc)| doc.id == id)
    }

    fn name_taken(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }
}

/// In-memory storage backend.
///
/// # Example
///
/// ```
/// use folio_core::{ContentKind, DuplicatePolicy};
/// use folio_storage::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::new("diary").with_duplicate_policy(DuplicatePolicy::Reject);
/// backend.create_file(ContentKind::Image, "a.jpg").unwrap();
/// assert!(backend.create_file(ContentKind::Image, "a.jpg").is_err());
/// ```
#[derive(Debug)]
pub struct MemoryBackend {
    scheme: DocumentScheme,
    duplicate_policy: DuplicatePolicy,
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    /// Create an empty root identified by `handle`.
    pub fn new(handle: &str) -> Self {
        Self {
            scheme: DocumentScheme::new("memory", handle),
            duplicate_policy: DuplicatePolicy::default(),
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Create an empty root honoring the storage settings.
    pub fn from_settings(root: &RootLocation, settings: &StorageSettings) -> Self {
        let backend = Self::new(&format!("{}:{}", root.handle(), root.prefix()))
            .with_duplicate_policy(*settings.duplicate_policy());
        if *settings.read_only() {
            backend.set_failure_policy(FailurePolicy::ReadOnly);
        }
        backend
    }

    /// Set the duplicate-name policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Replace the active failure policy.
    pub fn set_failure_policy(&self, policy: FailurePolicy) {
        if let Ok(mut state) = self.state() {
            tracing::debug!(?policy, "Setting failure policy");
            state.failures = policy;
        }
    }

    /// Register bytes outside the root, as a picked source would be, and
    /// return the locator that reads them.
    pub fn add_source(&self, bytes: impl Into<Vec<u8>>) -> Locator {
        let locator = Locator::new(format!("memory-source://external/{}", uuid::Uuid::new_v4()));
        if let Ok(mut state) = self.state() {
            state.sources.insert(locator.clone(), bytes.into());
        }
        locator
    }

    /// Current contents of a document, by name.
    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        let state = self.state().ok()?;
        let doc = state.documents.get(name)?;
        doc.data.lock().ok().map(|data| data.clone())
    }

    /// Number of documents beneath the root.
    pub fn document_count(&self) -> usize {
        self.state().map(|s| s.documents.len()).unwrap_or(0)
    }

    fn state(&self) -> FolioResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|e| BackendError::new(format!("Failed to lock memory storage: {}", e)).into())
    }

    fn document(&self, name: &str, doc: &StoredDocument) -> Document {
        Document::new(name, self.scheme.locator(&doc.id.to_string()), doc.mime_type.clone())
    }

    fn id_of(&self, locator: &Locator) -> Option<u64> {
        self.scheme.document_id(locator)?.parse().ok()
    }
}

impl StorageBackend for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    #[tracing::instrument(skip(self), fields(kind = %kind))]
    fn create_file(&self, kind: ContentKind, name: &str) -> FolioResult<Document> {
        validate_name(name).map_err(|e| StorageError::new(StorageErrorKind::InvalidName(e)))?;
        let mut state = self.state()?;

        if matches!(state.failures, FailurePolicy::DenyCreate | FailurePolicy::ReadOnly) {
            return Err(StorageError::access_denied(format!("create {}", name)).into());
        }

        let stored_name = if !state.name_taken(name) {
            name.to_string()
        } else {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(StorageError::new(StorageErrorKind::AlreadyExists(name.to_string())).into());
                }
                DuplicatePolicy::AutoSuffix => {
                    let mut n = 1;
                    while state.name_taken(&DuplicatePolicy::suffixed(name, n)) {
                        n += 1;
                    }
                    DuplicatePolicy::suffixed(name, n)
                }
            }
        };

        state.next_id += 1;
        let doc = StoredDocument {
            id: state.next_id,
            mime_type: kind.mime_type().to_string(),
            data: Arc::new(Mutex::new(Vec::new())),
        };
        let document = self.document(&stored_name, &doc);
        state.documents.insert(stored_name, doc);

        tracing::debug!(stored = %document.name(), locator = %document.locator(), "Created document");
        Ok(document)
    }

    fn find_file(&self, name: &str) -> FolioResult<Document> {
        validate_name(name).map_err(|e| StorageError::new(StorageErrorKind::InvalidName(e)))?;
        let state = self.state()?;
        state
            .documents
            .get(name)
            .map(|doc| self.document(name, doc))
            .ok_or_else(|| StorageError::not_found(name).into())
    }

    #[tracing::instrument(skip(self), fields(locator = %locator))]
    fn open_read(&self, locator: &Locator) -> FolioResult<Box<dyn Read + Send>> {
        let state = self.state()?;
        if state.failures == FailurePolicy::DenyOpenRead {
            return Err(StorageError::access_denied(format!("read {}", locator)).into());
        }

        let bytes = if let Some(bytes) = state.sources.get(locator) {
            bytes.clone()
        } else {
            let (_, doc) = self
                .id_of(locator)
                .and_then(|id| state.by_id(id))
                .ok_or_else(|| StorageError::not_found(locator.to_string()))?;
            doc.data
                .lock()
                .map_err(|e| BackendError::new(format!("Failed to lock document: {}", e)))?
                .clone()
        };

        let remaining = match state.failures {
            FailurePolicy::FailReadAfter(n) => Some(n),
            _ => None,
        };
        Ok(Box::new(MemoryReader {
            inner: Cursor::new(bytes),
            remaining,
        }))
    }

    #[tracing::instrument(skip(self), fields(locator = %locator))]
    fn open_write(&self, locator: &Locator) -> FolioResult<Box<dyn Write + Send>> {
        let state = self.state()?;
        if matches!(state.failures, FailurePolicy::DenyOpenWrite | FailurePolicy::ReadOnly) {
            return Err(StorageError::access_denied(format!("write {}", locator)).into());
        }
        if state.sources.contains_key(locator) {
            return Err(StorageError::access_denied(format!("{} is read-only", locator)).into());
        }

        let (_, doc) = self
            .id_of(locator)
            .and_then(|id| state.by_id(id))
            .ok_or_else(|| StorageError::not_found(locator.to_string()))?;

        doc.data
            .lock()
            .map_err(|e| BackendError::new(format!("Failed to lock document: {}", e)))?
            .clear();

        let remaining = match state.failures {
            FailurePolicy::FailWriteAfter(n) => Some(n),
            _ => None,
        };
        Ok(Box::new(MemoryWriter {
            buffer: Arc::clone(&doc.data),
            remaining,
        }))
    }

    #[tracing::instrument(skip(self), fields(locator = %locator))]
    fn delete(&self, locator: &Locator) -> bool {
        let Ok(mut state) = self.state() else {
            return false;
        };
        if state.failures == FailurePolicy::ReadOnly {
            return false;
        }

        let Some(name) = self
            .id_of(locator)
            .and_then(|id| state.by_id(id))
            .map(|(name, _)| name.clone())
        else {
            return false;
        };

        state.documents.remove(&name);
        tracing::debug!(name = %name, "Deleted document");
        true
    }

    fn list(&self) -> FolioResult<Vec<Document>> {
        let state = self.state()?;
        Ok(state
            .documents
            .iter()
            .map(|(name, doc)| self.document(name, doc))
            .collect())
    }
}

/// Reader that can fail after a fixed number of bytes.
struct MemoryReader {
    inner: Cursor<Vec<u8>>,
    remaining: Option<usize>,
}

impl Read for MemoryReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = match self.remaining {
            Some(0) => return Err(io::Error::other("injected read failure")),
            Some(n) => buf.len().min(n),
            None => buf.len(),
        };
        let read = self.inner.read(&mut buf[..limit])?;
        if let Some(n) = self.remaining.as_mut() {
            *n -= read;
        }
        Ok(read)
    }
}

/// Writer into a shared document buffer that can fail after a fixed number of bytes.
struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
    remaining: Option<usize>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let accepted = match self.remaining {
            Some(0) if !buf.is_empty() => return Err(io::Error::other("injected write failure")),
            Some(n) => buf.len().min(n),
            None => buf.len(),
        };
        self.buffer
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?
            .extend_from_slice(&buf[..accepted]);
        if let Some(n) = self.remaining.as_mut() {
            *n -= accepted;
        }
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
