//! Tests for filesystem storage backend.

use folio_core::{ContentKind, DuplicatePolicy, RootLocation, StorageSettings};
use folio_error::{FolioErrorKind, StorageErrorKind};
use folio_storage::{FileSystemBackend, Locator, StorageBackend};
use std::io::{Read, Write};
use tempfile::TempDir;

fn backend(temp_dir: &TempDir, settings: StorageSettings) -> FileSystemBackend {
    let root = RootLocation::new(temp_dir.path().to_string_lossy(), "diary/");
    FileSystemBackend::new(root, &settings).unwrap()
}

fn read_all(backend: &FileSystemBackend, locator: &Locator) -> Vec<u8> {
    let mut data = Vec::new();
    backend.open_read(locator).unwrap().read_to_end(&mut data).unwrap();
    data
}

#[test]
fn test_create_write_and_read() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    let doc = storage.create_file(ContentKind::Image, "img_0001.jpg").unwrap();
    assert_eq!(doc.name(), "img_0001.jpg");
    assert_eq!(doc.mime_type(), "image/jpeg");
    assert!(doc.locator().as_str().ends_with("/document/diary%2Fimg_0001.jpg"));

    let mut writer = storage.open_write(doc.locator()).unwrap();
    writer.write_all(b"Hello, world!").unwrap();
    writer.flush().unwrap();
    drop(writer);

    assert_eq!(read_all(&storage, doc.locator()), b"Hello, world!");
    assert!(temp_dir.path().join("diary/img_0001.jpg").is_file());
}

#[test]
fn test_missing_root_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let root = RootLocation::new(temp_dir.path().join("gone").to_string_lossy(), "diary");

    let err = FileSystemBackend::new(root, &StorageSettings::default()).unwrap_err();
    assert!(matches!(err.kind(), FolioErrorKind::Config(_)));
}

#[test]
fn test_find_file() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    let created = storage.create_file(ContentKind::StructuredText, "backup.json").unwrap();
    let found = storage.find_file("backup.json").unwrap();
    assert_eq!(found.locator(), created.locator());
    assert_eq!(found.mime_type(), "application/json");

    let err = storage.find_file("missing.jpg").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_canonical_locator_matches_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    let created = storage.create_file(ContentKind::Image, "img (2).jpg").unwrap();
    assert_eq!(storage.canonical_locator("img (2).jpg").as_ref(), Some(created.locator()));
    assert!(storage.canonical_locator("../escape.jpg").is_none());
}

#[test]
fn test_duplicate_auto_suffix() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    let first = storage.create_file(ContentKind::Image, "img.jpg").unwrap();
    let second = storage.create_file(ContentKind::Image, "img.jpg").unwrap();
    let third = storage.create_file(ContentKind::Image, "img.jpg").unwrap();

    assert_eq!(first.name(), "img.jpg");
    assert_eq!(second.name(), "img (1).jpg");
    assert_eq!(third.name(), "img (2).jpg");
    assert_ne!(first.locator(), second.locator());
}

#[test]
fn test_duplicate_reject() {
    let temp_dir = TempDir::new().unwrap();
    let settings = StorageSettings::default().with_duplicate_policy(DuplicatePolicy::Reject);
    let storage = backend(&temp_dir, settings);

    storage.create_file(ContentKind::Image, "img.jpg").unwrap();
    let err = storage.create_file(ContentKind::Image, "img.jpg").unwrap_err();
    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::AlreadyExists(_))));
    assert_eq!(storage.list().unwrap().len(), 1);
}

#[test]
fn test_invalid_names() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    for name in ["", "..", "sub/dir.jpg"] {
        let err = storage.create_file(ContentKind::Image, name).unwrap_err();
        assert!(matches!(err.storage_kind(), Some(StorageErrorKind::InvalidName(_))));
    }
}

#[test]
fn test_read_only_root() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default().with_read_only(true));

    let err = storage.create_file(ContentKind::Image, "img.jpg").unwrap_err();
    assert!(err.storage_kind().is_some_and(|k| k.is_access_failure()));
    assert!(storage.list().unwrap().is_empty());
}

#[test]
fn test_delete() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    let doc = storage.create_file(ContentKind::Image, "delete_me.jpg").unwrap();
    assert!(storage.delete(doc.locator()));
    assert!(!storage.delete(doc.locator()));
    assert!(storage.find_file("delete_me.jpg").is_err());
}

#[test]
fn test_open_missing_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    let locator = storage.canonical_locator("never_created.jpg").unwrap();
    assert!(storage.open_read(&locator).err().unwrap().is_not_found());
    assert!(storage.open_write(&locator).err().unwrap().is_not_found());
}

#[test]
fn test_foreign_locator_denied() {
    let temp_dir = TempDir::new().unwrap();
    let other_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());
    let other = backend(&other_dir, StorageSettings::default());

    let doc = other.create_file(ContentKind::Image, "theirs.jpg").unwrap();
    let err = storage.open_write(doc.locator()).err().unwrap();
    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::AccessDenied(_))));
    assert!(!storage.delete(doc.locator()));
}

#[test]
fn test_external_file_sources_are_readable() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    let source_path = temp_dir.path().join("picked.jpg");
    std::fs::write(&source_path, b"picked bytes").unwrap();
    let source = Locator::from_file_path(&source_path).unwrap();

    assert_eq!(read_all(&storage, &source), b"picked bytes");
    assert!(storage.open_write(&source).is_err());
}

#[test]
fn test_list_only_covers_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());
    std::fs::write(temp_dir.path().join("outside.jpg"), b"x").unwrap();

    storage.create_file(ContentKind::Image, "b.jpg").unwrap();
    storage.create_file(ContentKind::Image, "a.jpg").unwrap();

    let names: Vec<_> = storage.list().unwrap().iter().map(|d| d.name().clone()).collect();
    assert_eq!(names, vec!["a.jpg", "b.jpg"]);
}

#[test]
fn test_create_reports_declared_kind() {
    let temp_dir = TempDir::new().unwrap();
    let storage = backend(&temp_dir, StorageSettings::default());

    let doc = storage.create_file(ContentKind::Image, "img_20240301_083000").unwrap();
    assert_eq!(doc.mime_type(), "image/jpeg");

    let export = storage.create_file(ContentKind::StructuredText, "backup").unwrap();
    assert_eq!(export.mime_type(), "application/json");

    let found = storage.find_file("img_20240301_083000").unwrap();
    assert_eq!(found.locator(), doc.locator());
    assert_eq!(found.mime_type(), "application/octet-stream");
}
