//! Serialization seam for whole-collection exports.

use folio_error::{FolioResult, JsonError, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::marker::PhantomData;

/// Turns an ordered entry collection into text and back.
pub trait EntryCodec: Send + Sync {
    /// Record type carried by the export.
    type Entry;

    /// Serialize the whole collection.
    fn encode(&self, entries: &[Self::Entry]) -> FolioResult<String>;

    /// Deserialize a whole collection from a stream, preserving order.
    fn decode(&self, reader: &mut dyn Read) -> FolioResult<Vec<Self::Entry>>;
}

/// JSON array codec for any serde record.
///
/// # Example
///
/// ```
/// use folio_core::DiaryEntry;
/// use folio_diary::{EntryCodec, JsonCodec};
///
/// let codec = JsonCodec::<DiaryEntry>::new(false);
/// assert_eq!(codec.encode(&[]).unwrap(), "[]");
/// ```
#[derive(Debug, Clone)]
pub struct JsonCodec<E> {
    pretty: bool,
    _entry: PhantomData<fn() -> E>,
}

impl<E> JsonCodec<E> {
    /// Create a codec, optionally pretty-printing.
    pub fn new(pretty: bool) -> Self {
        Self {
            pretty,
            _entry: PhantomData,
        }
    }
}

impl<E> Default for JsonCodec<E> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<E> EntryCodec for JsonCodec<E>
where
    E: Serialize + DeserializeOwned,
{
    type Entry = E;

    fn encode(&self, entries: &[E]) -> FolioResult<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(entries)
        } else {
            serde_json::to_string(entries)
        };
        text.map_err(|e| JsonError::from(e).into())
    }

    fn decode(&self, reader: &mut dyn Read) -> FolioResult<Vec<E>> {
        serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                StorageError::partial_io(format!("read export: {}", e)).into()
            } else {
                JsonError::from(e).into()
            }
        })
    }
}
