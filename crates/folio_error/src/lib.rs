//! Error types for the Folio library.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use folio_error::{FolioResult, StorageError, StorageErrorKind};
//!
//! fn open_missing() -> FolioResult<Vec<u8>> {
//!     Err(StorageError::new(StorageErrorKind::NotFound("img_0001.jpg".to_string())))?
//! }
//!
//! let err = open_missing().unwrap_err();
//! assert!(err.is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod json;
mod storage;

pub use backend::BackendError;
pub use config::ConfigError;
pub use error::{FolioError, FolioErrorKind, FolioResult};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
