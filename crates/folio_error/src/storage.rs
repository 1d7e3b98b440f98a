//! Storage error types.

/// Kinds of storage errors.
///
/// `AccessDenied`, `InvalidName` and `AlreadyExists` are all refusals by the
/// backend to create or open a file. `NotFound` is a lookup miss. `PartialIo`
/// is a stream failing after it was successfully opened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// No file with that name or locator exists under the root
    #[display("Document not found: {}", _0)]
    NotFound(String),
    /// The backend refused to create or open the file
    #[display("Access denied: {}", _0)]
    AccessDenied(String),
    /// The filename cannot be represented beneath the root
    #[display("Invalid filename: {}", _0)]
    InvalidName(String),
    /// A file with that name exists and the backend rejects duplicates
    #[display("Document already exists: {}", _0)]
    AlreadyExists(String),
    /// A read, write or flush failed part way through
    #[display("Partial I/O: {}", _0)]
    PartialIo(String),
}

impl StorageErrorKind {
    /// Whether this kind belongs to the access-or-permission failure class.
    pub fn is_access_failure(&self) -> bool {
        matches!(
            self,
            StorageErrorKind::AccessDenied(_)
                | StorageErrorKind::InvalidName(_)
                | StorageErrorKind::AlreadyExists(_)
        )
    }
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("backup.json".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a `NotFound` error.
    #[track_caller]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::NotFound(what.into()))
    }

    /// Shorthand for an `AccessDenied` error.
    #[track_caller]
    pub fn access_denied(what: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::AccessDenied(what.into()))
    }

    /// Shorthand for a `PartialIo` error.
    #[track_caller]
    pub fn partial_io(what: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::PartialIo(what.into()))
    }
}
