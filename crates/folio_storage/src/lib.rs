//! Locator-addressed storage for Folio.
//!
//! Storage is reached only through a [`StorageBackend`], which hands out opaque
//! [`Locator`]s for files beneath one externally granted root. Callers never
//! build paths themselves.
//!
//! # Backends
//!
//! - [`FileSystemBackend`]: a directory tree on local disk
//! - [`MemoryBackend`]: deterministic in-memory fake with failure injection
//!
//! # Example
//!
//! ```rust
//! use folio_core::ContentKind;
//! use folio_storage::{MemoryBackend, StorageBackend};
//! use std::io::{Read, Write};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = MemoryBackend::new("diary");
//! let doc = backend.create_file(ContentKind::Image, "img_0001.jpg")?;
//!
//! let mut writer = backend.open_write(doc.locator())?;
//! writer.write_all(b"jpeg bytes")?;
//! writer.flush()?;
//! drop(writer);
//!
//! let mut contents = Vec::new();
//! backend.open_read(doc.locator())?.read_to_end(&mut contents)?;
//! assert_eq!(contents, b"jpeg bytes");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod filesystem;
mod locator;
mod memory;

pub use backend::StorageBackend;
pub use filesystem::FileSystemBackend;
pub use folio_error::{StorageError, StorageErrorKind};
pub use locator::{Document, Locator};
pub use memory::{FailurePolicy, MemoryBackend};
