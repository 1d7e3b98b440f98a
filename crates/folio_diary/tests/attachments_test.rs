use folio_cache::ResourceLocatorCache;
use folio_core::{CacheSettings, DuplicatePolicy};
use folio_diary::AttachmentManager;
use folio_error::StorageErrorKind;
use folio_storage::{FailurePolicy, Locator, MemoryBackend, StorageBackend};
use std::sync::Arc;

fn manager(backend: &Arc<MemoryBackend>) -> AttachmentManager {
    AttachmentManager::new(backend.clone(), ResourceLocatorCache::unbounded())
}

#[test]
fn resolve_twice_returns_same_locator() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let attachments = manager(&backend);
    attachments.create_dummy("img_0001.jpg").unwrap();

    let first = attachments.resolve("img_0001.jpg").unwrap();
    let second = attachments.resolve("img_0001.jpg").unwrap();
    assert_eq!(first, second);
}

#[test]
fn copy_in_copies_full_stream() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let payload: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    let source = backend.add_source(payload.clone());
    let attachments = manager(&backend);

    let locator = attachments.copy_in(&source, "img_0001.jpg").unwrap();

    assert_eq!(backend.contents("img_0001.jpg").unwrap(), payload);
    assert_eq!(backend.find_file("img_0001.jpg").unwrap().locator(), &locator);
    assert_eq!(backend.find_file("img_0001.jpg").unwrap().mime_type(), "image/jpeg");
}

#[test]
fn copy_in_then_delete_keeps_stale_locator() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let source = backend.add_source(b"jpeg".to_vec());
    let attachments = manager(&backend);

    let locator = attachments.copy_in(&source, "img_0001.jpg").unwrap();
    attachments.delete("img_0001.jpg");

    assert!(backend.find_file("img_0001.jpg").is_err());
    assert_eq!(attachments.resolve("img_0001.jpg").unwrap(), locator);
}

#[test]
fn copy_in_again_after_delete_keeps_first_locator() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let source = backend.add_source(b"jpeg".to_vec());
    let attachments = manager(&backend);

    let first = attachments.copy_in(&source, "img_0001.jpg").unwrap();
    attachments.delete("img_0001.jpg");
    let second = attachments.copy_in(&source, "img_0001.jpg").unwrap();

    assert_ne!(first, second);
    assert_eq!(backend.find_file("img_0001.jpg").unwrap().locator(), &second);
    assert_eq!(attachments.resolve("img_0001.jpg").unwrap(), first);
}

#[test]
fn invalidate_on_delete_forgets_locator() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let source = backend.add_source(b"jpeg".to_vec());
    let attachments = manager(&backend).with_invalidate_on_delete(true);

    attachments.copy_in(&source, "img_0001.jpg").unwrap();
    attachments.delete("img_0001.jpg");

    assert!(attachments.resolve("img_0001.jpg").unwrap_err().is_not_found());
}

#[test]
fn unreadable_source_creates_nothing() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let attachments = manager(&backend);

    let missing = Locator::new("memory-source://external/never-registered");
    assert!(attachments.copy_in(&missing, "img_0001.jpg").unwrap_err().is_not_found());

    let source = backend.add_source(b"jpeg".to_vec());
    backend.set_failure_policy(FailurePolicy::DenyOpenRead);
    let err = attachments.copy_in(&source, "img_0001.jpg").unwrap_err();
    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::AccessDenied(_))));

    assert!(backend.list().unwrap().is_empty());
    assert!(attachments.cache().is_empty());
}

#[test]
fn unwritable_destination_is_rolled_back() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let source = backend.add_source(b"jpeg".to_vec());
    let attachments = manager(&backend);
    backend.set_failure_policy(FailurePolicy::DenyOpenWrite);

    let err = attachments.copy_in(&source, "img_0001.jpg").unwrap_err();

    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::AccessDenied(_))));
    assert!(backend.list().unwrap().is_empty());
    assert!(attachments.cache().get("img_0001.jpg").is_none());
}

#[test]
fn mid_copy_failure_is_rolled_back() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let source = backend.add_source(vec![7u8; 32 * 1024]);
    let attachments = manager(&backend);
    backend.set_failure_policy(FailurePolicy::FailWriteAfter(1024));

    let err = attachments.copy_in(&source, "img_0001.jpg").unwrap_err();

    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::PartialIo(_))));
    assert_eq!(backend.document_count(), 0);
}

#[test]
fn refused_create_reports_access_failure() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let source = backend.add_source(b"jpeg".to_vec());
    let attachments = manager(&backend);
    backend.set_failure_policy(FailurePolicy::DenyCreate);

    let err = attachments.copy_in(&source, "img_0001.jpg").unwrap_err();
    assert!(err.storage_kind().is_some_and(|k| k.is_access_failure()));
    assert!(attachments.create_dummy("img_0002.jpg").is_err());
}

#[test]
fn delete_is_idempotent() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let attachments = manager(&backend);
    attachments.create_dummy("img_0001.jpg").unwrap();

    attachments.delete("img_0001.jpg");
    attachments.delete("img_0001.jpg");
    attachments.delete("never_existed.jpg");

    assert_eq!(backend.document_count(), 0);
}

#[test]
fn create_dummy_is_empty_image() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let attachments = manager(&backend);

    let locator = attachments.create_dummy("img_0001.jpg").unwrap();

    let doc = backend.find_file("img_0001.jpg").unwrap();
    assert_eq!(doc.locator(), &locator);
    assert_eq!(doc.mime_type(), "image/jpeg");
    assert!(backend.contents("img_0001.jpg").unwrap().is_empty());
    assert_eq!(attachments.cache().get("img_0001.jpg"), Some(locator));
}

#[test]
fn create_dummy_does_not_need_write_access() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let attachments = manager(&backend);
    backend.set_failure_policy(FailurePolicy::DenyOpenWrite);

    let locator = attachments.create_dummy("img.jpg").unwrap();

    assert_eq!(backend.document_count(), 1);
    assert_eq!(backend.find_file("img.jpg").unwrap().locator(), &locator);
    assert!(backend.contents("img.jpg").unwrap().is_empty());
}

#[test]
fn create_dummy_duplicate_auto_suffix() {
    let backend = Arc::new(MemoryBackend::new("diary").with_duplicate_policy(DuplicatePolicy::AutoSuffix));
    let attachments = manager(&backend);

    let original = attachments.create_dummy("img.jpg").unwrap();
    let duplicate = attachments.create_dummy("img.jpg").unwrap();

    assert_ne!(original, duplicate);
    assert_eq!(backend.find_file("img (1).jpg").unwrap().locator(), &duplicate);
    // The requested name still maps to the original file.
    assert_eq!(attachments.resolve("img.jpg").unwrap(), original);
}

#[test]
fn create_dummy_duplicate_reject() {
    let backend = Arc::new(MemoryBackend::new("diary").with_duplicate_policy(DuplicatePolicy::Reject));
    let attachments = manager(&backend);

    attachments.create_dummy("img.jpg").unwrap();
    let err = attachments.create_dummy("img.jpg").unwrap_err();

    assert!(matches!(err.storage_kind(), Some(StorageErrorKind::AlreadyExists(_))));
    assert_eq!(backend.document_count(), 1);
}

#[test]
fn share_reference_grants_read() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let attachments = manager(&backend);
    let locator = attachments.create_dummy("img_0001.jpg").unwrap();

    let share = attachments.share_reference("img_0001.jpg").unwrap();
    assert_eq!(share.locator(), &locator);
    assert!(*share.read_grant());
    assert_eq!(*share.mime_type(), "image/jpeg");

    assert!(attachments.share_reference("missing.jpg").is_err());
}

#[test]
fn reset_cache_forces_fresh_lookup() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let attachments = manager(&backend);
    let old = attachments.create_dummy("img.jpg").unwrap();

    assert!(backend.delete(&old));
    let recreated = backend
        .create_file(folio_core::ContentKind::Image, "img.jpg")
        .unwrap();

    assert_eq!(attachments.resolve("img.jpg").unwrap(), old);
    attachments.reset_cache();
    assert_eq!(&attachments.resolve("img.jpg").unwrap(), recreated.locator());
}

#[test]
fn from_settings_applies_cache_settings() {
    let backend = Arc::new(MemoryBackend::new("diary"));
    let settings = CacheSettings::default()
        .with_invalidate_on_delete(true)
        .with_max_entries(Some(1));
    let attachments = AttachmentManager::from_settings(backend.clone(), &settings);

    attachments.create_dummy("a.jpg").unwrap();
    attachments.create_dummy("b.jpg").unwrap();
    assert_eq!(attachments.cache().len(), 1);

    attachments.delete("b.jpg");
    assert!(attachments.cache().is_empty());
}
