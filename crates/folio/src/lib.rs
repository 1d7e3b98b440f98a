//! Folio - sandboxed attachment storage for diary applications
//!
//! Folio manages photo attachments and whole-collection exports beneath one
//! storage root that the host grants up front. Files are reached only through
//! opaque locators handed out by a storage backend.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio::{DiaryEntry, DiaryStore, FolioConfig, Locator, RootLocation};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! folio::init_tracing();
//!
//! let config = FolioConfig::load()?;
//! let store = DiaryStore::open(RootLocation::new("/storage/emulated/0", "diary"), &config)?;
//!
//! let picked = Locator::from_file_path("/tmp/picked.jpg").unwrap();
//! store.attachments().copy_in(&picked, "img_0001.jpg")?;
//!
//! let entry = DiaryEntry::builder().id(1).attachments(vec!["img_0001.jpg".to_string()]).build()?;
//! let backup = store.exports().export("backup.json", &[entry])?;
//! let restored = store.exports().import(&backup)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `folio_error` - Error types
//! - `folio_core` - Entry records, content kinds, root location, configuration
//! - `folio_storage` - Storage backend trait, filesystem and in-memory backends
//! - `folio_cache` - Filename to locator memoization
//! - `folio_diary` - Attachment manager and export/import service
//!
//! This crate (`folio`) re-exports everything for convenience.

mod telemetry;

pub use folio_cache::*;
pub use folio_core::*;
pub use folio_diary::*;
pub use folio_error::*;
pub use folio_storage::{
    Document, FailurePolicy, FileSystemBackend, Locator, MemoryBackend, StorageBackend,
};
pub use telemetry::{init_tracing, init_tracing_with_filter};
