//! Declared content kinds and duplicate-name policies.

use serde::{Deserialize, Serialize};

/// Kind of content declared to the backend when a file is created.
///
/// # Examples
///
/// ```
/// use folio_core::ContentKind;
///
/// assert_eq!(ContentKind::Image.mime_type(), "image/jpeg");
/// assert_eq!(format!("{}", ContentKind::StructuredText), "structured-text");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Photo attachment
    #[display("image")]
    Image,
    /// Whole-collection export
    #[display("structured-text")]
    StructuredText,
}

impl ContentKind {
    /// MIME type declared on creation.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentKind::Image => "image/jpeg",
            ContentKind::StructuredText => "application/json",
        }
    }

    /// Reverse lookup from a declared MIME type.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" | "image/jpg" => Some(ContentKind::Image),
            "application/json" => Some(ContentKind::StructuredText),
            _ => None,
        }
    }
}

/// What a backend does when asked to create a name that already exists.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Store under `name (1).ext`, `name (2).ext`, ...
    #[default]
    #[display("auto_suffix")]
    AutoSuffix,
    /// Refuse with `AlreadyExists`
    #[display("reject")]
    Reject,
}

impl DuplicatePolicy {
    /// The `n`th alternative for `name` under the auto-suffix scheme.
    ///
    /// The suffix goes before the last extension, if any.
    ///
    /// ```
    /// use folio_core::DuplicatePolicy;
    ///
    /// assert_eq!(DuplicatePolicy::suffixed("img_0001.jpg", 1), "img_0001 (1).jpg");
    /// assert_eq!(DuplicatePolicy::suffixed("notes", 2), "notes (2)");
    /// ```
    pub fn suffixed(name: &str, n: u32) -> String {
        match name.rfind('.') {
            Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], n, &name[dot..]),
            _ => format!("{} ({})", name, n),
        }
    }
}
