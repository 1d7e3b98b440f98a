//! The externally granted storage root.

use serde::{Deserialize, Serialize};

/// An opaque handle plus a path prefix, granted once by the host environment.
///
/// Every file operation is scoped beneath it. The prefix is stored without
/// leading or trailing slashes.
///
/// # Examples
///
/// ```
/// use folio_core::RootLocation;
///
/// let root = RootLocation::new("/storage/emulated/0", "/diary/");
/// assert_eq!(root.prefix(), "diary");
/// assert_eq!(root.handle(), "/storage/emulated/0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct RootLocation {
    /// Opaque handle issued by the host
    handle: String,
    /// Subtree beneath the handle
    #[serde(default, deserialize_with = "trimmed_prefix")]
    prefix: String,
}

impl RootLocation {
    /// Create a root location, normalizing the prefix.
    pub fn new(handle: impl Into<String>, prefix: impl AsRef<str>) -> Self {
        Self {
            handle: handle.into(),
            prefix: prefix.as_ref().trim_matches('/').to_string(),
        }
    }

    /// The prefix with a name appended, `/`-separated.
    pub fn document_path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.prefix, name)
        }
    }
}

fn trimmed_prefix<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim_matches('/').to_string())
}
