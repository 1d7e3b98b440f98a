//! Top-level error wrapper types.

use crate::{BackendError, ConfigError, JsonError, StorageError, StorageErrorKind};

/// Every failure a Folio operation can report.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioError, JsonError};
///
/// let err: FolioError = JsonError::new("trailing characters").into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FolioErrorKind {
    /// Storage backend error
    #[from(StorageError)]
    Storage(StorageError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error, including a missing storage root
    #[from(ConfigError)]
    Config(ConfigError),
    /// Internal backend failure
    #[from(BackendError)]
    Backend(BackendError),
}

/// Folio error with kind discrimination.
///
/// # Examples
///
/// ```
/// use folio_error::{FolioResult, StorageError, StorageErrorKind};
///
/// fn create() -> FolioResult<()> {
///     Err(StorageError::access_denied("quota exceeded"))?
/// }
///
/// let err = create().unwrap_err();
/// assert!(matches!(err.storage_kind(), Some(StorageErrorKind::AccessDenied(_))));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Folio Error: {}", _0)]
pub struct FolioError(Box<FolioErrorKind>);

impl FolioError {
    /// Create a new error from a kind.
    pub fn new(kind: FolioErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FolioErrorKind {
        &self.0
    }

    /// Get the storage error kind, if this is a storage error.
    pub fn storage_kind(&self) -> Option<&StorageErrorKind> {
        match self.kind() {
            FolioErrorKind::Storage(err) => Some(&err.kind),
            _ => None,
        }
    }

    /// Whether this error is a storage `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self.storage_kind(), Some(StorageErrorKind::NotFound(_)))
    }
}

// Generic From implementation for any type that converts to FolioErrorKind
impl<T> From<T> for FolioError
where
    T: Into<FolioErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Folio operations.
pub type FolioResult<T> = std::result::Result<T, FolioError>;
