//! Filesystem-backed storage root.
//!
//! The granted root handle is a directory; documents live directly beneath
//! `{handle}/{prefix}`. Locators are `folio://{root_id}/document/{prefix}%2F{name}`,
//! the same shape a tree-document provider hands out.

use crate::locator::{DocumentScheme, validate_name};
use crate::{Document, Locator, StorageBackend};
use folio_core::{ContentKind, DuplicatePolicy, RootLocation, StorageSettings};
use folio_error::{ConfigError, FolioResult, StorageError, StorageErrorKind};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// # Example Structure
///
/// ```text
/// /storage/emulated/0/          <- root handle
/// └── diary/                    <- prefix
///     ├── img_20240301_083000.jpg
///     ├── img_20240301_083000 (1).jpg
///     └── backup.json
/// ```
///
/// `file://` locators are accepted for reading only, so that sources picked by
/// the host can be copied in.
#[derive(Debug)]
pub struct FileSystemBackend {
    root: RootLocation,
    directory: PathBuf,
    scheme: DocumentScheme,
    duplicate_policy: DuplicatePolicy,
    read_only: bool,
}

impl FileSystemBackend {
    /// Open a granted root.
    ///
    /// The handle directory must already exist; the prefix subtree is created if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the root handle is missing or is not a
    /// directory. Callers should treat that as fatal.
    #[tracing::instrument(skip(root, settings), fields(handle = %root.handle(), prefix = %root.prefix()))]
    pub fn new(root: RootLocation, settings: &StorageSettings) -> FolioResult<Self> {
        let handle = Path::new(root.handle());
        if !handle.is_dir() {
            return Err(ConfigError::new(format!(
                "Storage root {} is not an existing directory",
                handle.display()
            ))
            .into());
        }

        let directory = handle.join(root.prefix());
        fs::create_dir_all(&directory).map_err(|e| {
            ConfigError::new(format!(
                "Failed to create root prefix {}: {}",
                directory.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %directory.display(),
            duplicate_policy = %settings.duplicate_policy(),
            read_only = settings.read_only(),
            "Opened filesystem storage root"
        );

        Ok(Self {
            scheme: DocumentScheme::new("folio", root.handle()),
            root,
            directory,
            duplicate_policy: *settings.duplicate_policy(),
            read_only: *settings.read_only(),
        })
    }

    /// The granted root.
    pub fn root(&self) -> &RootLocation {
        &self.root
    }

    /// Document for an existing file, typed by its extension.
    fn document(&self, name: &str) -> Document {
        self.typed_document(name, mime_guess::from_path(name).first_or_octet_stream().to_string())
    }

    fn typed_document(&self, name: &str, mime_type: String) -> Document {
        Document::new(name, self.scheme.locator(&self.root.document_path(name)), mime_type)
    }

    /// Resolve a locator issued by this root to its file path.
    fn path_for(&self, locator: &Locator) -> FolioResult<PathBuf> {
        let id = self
            .scheme
            .document_id(locator)
            .ok_or_else(|| StorageError::access_denied(format!("{} is outside this root", locator)))?;

        let name = match self.root.prefix().as_str() {
            "" => id.as_str(),
            prefix => id
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
                .ok_or_else(|| StorageError::access_denied(format!("{} is outside this root", locator)))?,
        };
        validate_name(name).map_err(|e| StorageError::new(StorageErrorKind::InvalidName(e)))?;

        Ok(self.directory.join(name))
    }

    fn deny_if_read_only(&self, what: &str) -> FolioResult<()> {
        if self.read_only {
            tracing::warn!(what, "Refusing write on read-only root");
            return Err(StorageError::access_denied(format!("root is read-only: {}", what)).into());
        }
        Ok(())
    }

    /// Create `name` exclusively, returning false if it already exists.
    fn create_exclusive(&self, name: &str) -> FolioResult<bool> {
        let path = self.directory.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(map_io_error(e, &path).into()),
        }
    }
}

fn map_io_error(e: io::Error, path: &Path) -> StorageError {
    let what = format!("{}: {}", path.display(), e);
    match e.kind() {
        io::ErrorKind::NotFound => StorageError::not_found(what),
        io::ErrorKind::PermissionDenied => StorageError::access_denied(what),
        _ => StorageError::partial_io(what),
    }
}

impl StorageBackend for FileSystemBackend {
    fn backend_name(&self) -> &'static str {
        "filesystem"
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    #[tracing::instrument(skip(self), fields(kind = %kind))]
    fn create_file(&self, kind: ContentKind, name: &str) -> FolioResult<Document> {
        validate_name(name).map_err(|e| StorageError::new(StorageErrorKind::InvalidName(e)))?;
        self.deny_if_read_only(name)?;

        if self.create_exclusive(name)? {
            tracing::debug!(name, mime_type = kind.mime_type(), "Created document");
            return Ok(self.typed_document(name, kind.mime_type().to_string()));
        }

        match self.duplicate_policy {
            DuplicatePolicy::Reject => {
                tracing::debug!(name, "Rejected duplicate document name");
                Err(StorageError::new(StorageErrorKind::AlreadyExists(name.to_string())).into())
            }
            DuplicatePolicy::AutoSuffix => {
                let mut n = 1;
                loop {
                    let candidate = DuplicatePolicy::suffixed(name, n);
                    if self.create_exclusive(&candidate)? {
                        tracing::debug!(requested = name, stored = %candidate, "Created suffixed document");
                        return Ok(self.typed_document(&candidate, kind.mime_type().to_string()));
                    }
                    n += 1;
                }
            }
        }
    }

    #[tracing::instrument(skip(self))]
    fn find_file(&self, name: &str) -> FolioResult<Document> {
        validate_name(name).map_err(|e| StorageError::new(StorageErrorKind::InvalidName(e)))?;
        if self.directory.join(name).is_file() {
            Ok(self.document(name))
        } else {
            Err(StorageError::not_found(name).into())
        }
    }

    #[tracing::instrument(skip(self), fields(locator = %locator))]
    fn open_read(&self, locator: &Locator) -> FolioResult<Box<dyn Read + Send>> {
        let path = match locator.to_file_path() {
            Some(external) => external,
            None => self.path_for(locator)?,
        };

        let file = File::open(&path).map_err(|e| map_io_error(e, &path))?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self), fields(locator = %locator))]
    fn open_write(&self, locator: &Locator) -> FolioResult<Box<dyn Write + Send>> {
        let path = self.path_for(locator)?;
        self.deny_if_read_only(locator.as_str())?;

        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| map_io_error(e, &path))?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self), fields(locator = %locator))]
    fn delete(&self, locator: &Locator) -> bool {
        if self.read_only {
            return false;
        }
        let Ok(path) = self.path_for(locator) else {
            return false;
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Deleted document");
                true
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Delete failed");
                false
            }
        }
    }

    fn list(&self) -> FolioResult<Vec<Document>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| map_io_error(e, &self.directory))?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(e, &self.directory))?;
            if !entry.path().is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                documents.push(self.document(name));
            }
        }
        documents.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(documents)
    }

    fn canonical_locator(&self, name: &str) -> Option<Locator> {
        validate_name(name).ok()?;
        Some(self.scheme.locator(&self.root.document_path(name)))
    }
}
