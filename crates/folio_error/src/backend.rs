//! Backend error types.

/// Backend error with source location.
///
/// Raised for failures that are not a storage answer at all, such as a
/// poisoned lock guarding in-memory state.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", message, line, file)]
pub struct BackendError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_error::BackendError;
    ///
    /// let err = BackendError::new("Failed to lock document table");
    /// assert!(err.message.contains("lock"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
