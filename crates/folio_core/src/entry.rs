//! Diary entry records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A journal entry as exported and imported in bulk.
///
/// Attachments are referenced by filename only; the files themselves live
/// beside the export under the same root.
///
/// # Examples
///
/// ```
/// use folio_core::DiaryEntry;
///
/// let entry = DiaryEntry::builder()
///     .id(1)
///     .text("First day with the new camera")
///     .attachments(vec!["img_0001.jpg".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(entry.attachments().len(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(setter(into))]
pub struct DiaryEntry {
    /// Entry identifier
    id: i64,
    /// Free text body
    #[builder(default)]
    #[serde(default)]
    text: String,
    /// When the entry was written
    #[builder(default = "Utc::now()")]
    timestamp: DateTime<Utc>,
    /// Attachment filenames, in display order
    #[builder(default)]
    #[serde(default)]
    attachments: Vec<String>,
}

impl DiaryEntry {
    /// Creates a new entry builder.
    pub fn builder() -> DiaryEntryBuilder {
        DiaryEntryBuilder::default()
    }

    /// Whether the entry references the given attachment filename.
    pub fn references(&self, filename: &str) -> bool {
        self.attachments.iter().any(|a| a == filename)
    }
}
