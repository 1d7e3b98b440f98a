//! Core data types for the Folio attachment library.
//!
//! This crate provides the types shared by every Folio crate: the diary entry
//! record, declared content kinds, the externally granted root location, and
//! configuration loading.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod content_kind;
mod entry;
mod root;

pub use config::{
    CacheSettings, CacheSettingsBuilder, ExportSettings, FolioConfig, StorageSettings,
    StorageSettingsBuilder,
};
pub use content_kind::{ContentKind, DuplicatePolicy};
pub use entry::{DiaryEntry, DiaryEntryBuilder};
pub use root::RootLocation;
