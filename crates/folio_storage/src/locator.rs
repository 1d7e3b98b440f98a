//! Resource locators and document descriptors.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use url::{Url, form_urlencoded};

/// Opaque reference sufficient to open one file.
///
/// Locators are handed out by a backend at creation or lookup time. They render
/// as URIs, but callers must treat them as opaque: two locators are the same
/// file only if the backend issued them as such.
///
/// # Examples
///
/// ```
/// use folio_storage::Locator;
///
/// let source = Locator::new("file:///tmp/picked.jpg");
/// assert_eq!(source.as_str(), "file:///tmp/picked.jpg");
/// assert_eq!(source.scheme(), Some("file"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{}", _0)]
pub struct Locator(String);

impl Locator {
    /// Wrap a locator string received from a backend or the host.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Locator for a file outside any root, such as a picked source image.
    ///
    /// Returns `None` for relative paths.
    pub fn from_file_path(path: impl AsRef<Path>) -> Option<Self> {
        Url::from_file_path(path.as_ref())
            .ok()
            .map(|url| Self(url.to_string()))
    }

    /// The raw locator string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URI scheme, if the locator parses as a URI.
    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once("://").map(|(scheme, _)| scheme)
    }

    /// Filesystem path of a `file://` locator.
    pub(crate) fn to_file_path(&self) -> Option<PathBuf> {
        Url::parse(&self.0).ok()?.to_file_path().ok()
    }
}

/// A file beneath the root, as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct Document {
    /// Name actually stored under the root
    name: String,
    /// Locator issued for the file
    locator: Locator,
    /// Declared or guessed MIME type
    mime_type: String,
}

impl Document {
    pub(crate) fn new(name: impl Into<String>, locator: Locator, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator,
            mime_type: mime_type.into(),
        }
    }
}

/// Tree-document addressing shared by the backends.
///
/// Locators look like `{scheme}://{root_id}/document/{encoded_id}` where the
/// root id is derived from the root handle and the document id is the
/// form-encoded `prefix/name`.
#[derive(Debug, Clone)]
pub(crate) struct DocumentScheme {
    scheme: &'static str,
    root_id: String,
}

impl DocumentScheme {
    pub(crate) fn new(scheme: &'static str, handle: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(handle.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        Self {
            scheme,
            root_id: digest[..16].to_string(),
        }
    }

    pub(crate) fn locator(&self, document_id: &str) -> Locator {
        let encoded: String = form_urlencoded::byte_serialize(document_id.as_bytes()).collect();
        Locator(format!(
            "{}://{}/document/{}",
            self.scheme, self.root_id, encoded
        ))
    }

    /// The decoded document id, if the locator was issued under this root.
    pub(crate) fn document_id(&self, locator: &Locator) -> Option<String> {
        let url = Url::parse(locator.as_str()).ok()?;
        if url.scheme() != self.scheme || url.host_str() != Some(self.root_id.as_str()) {
            return None;
        }

        let mut segments = url.path_segments()?;
        if segments.next() != Some("document") {
            return None;
        }
        let encoded = segments.next()?;
        if segments.next().is_some() {
            return None;
        }

        form_urlencoded::parse(encoded.as_bytes())
            .next()
            .map(|(id, _)| id.into_owned())
    }
}

/// Reject names that cannot live directly beneath the root.
pub(crate) fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty filename".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!("reserved filename {:?}", name));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(format!("filename {:?} contains a separator", name));
    }
    Ok(())
}
