//! Attachment lifecycle and bulk export/import for Folio diaries.
//!
//! - [`AttachmentManager`] creates, copies in, deletes and resolves photo
//!   attachments, memoizing locators in a [`ResourceLocatorCache`].
//! - [`ExportImportService`] writes a whole entry collection to one file and
//!   reads it back through an [`EntryCodec`].
//! - [`DiaryStore`] wires both onto a filesystem root from configuration.
//!
//! [`ResourceLocatorCache`]: folio_cache::ResourceLocatorCache

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attachments;
mod codec;
mod export;
mod naming;
mod store;
mod transfer;

pub use attachments::{AttachmentManager, ShareReference};
pub use codec::{EntryCodec, JsonCodec};
pub use export::ExportImportService;
pub use naming::{capture_filename, export_filename};
pub use store::DiaryStore;
