//! End-to-end diary scenario against both backends.

use folio_core::{DiaryEntry, FolioConfig, RootLocation};
use folio_diary::DiaryStore;
use folio_error::FolioErrorKind;
use folio_storage::{Locator, MemoryBackend, StorageBackend};
use std::sync::Arc;
use tempfile::TempDir;

fn run_scenario(store: &DiaryStore, source: &Locator) {
    let attachments = store.attachments();
    let exports = store.exports();

    let locator = attachments.copy_in(source, "img_0001.jpg").unwrap();
    assert_eq!(attachments.resolve("img_0001.jpg").unwrap(), locator);

    let entry = DiaryEntry::builder()
        .id(1)
        .text("Sunrise at the lake")
        .attachments(vec!["img_0001.jpg".to_string()])
        .build()
        .unwrap();
    exports.export("backup.json", std::slice::from_ref(&entry)).unwrap();

    let backup = attachments.resolve("backup.json").unwrap();
    assert_eq!(exports.import(&backup).unwrap(), vec![entry]);
}

#[test]
fn scenario_on_filesystem_root() {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("camera.jpg");
    std::fs::write(&source_path, b"\xff\xd8\xff\xe0 jpeg").unwrap();

    let root = RootLocation::new(temp_dir.path().to_string_lossy(), "diary/");
    let store = DiaryStore::open(root, &FolioConfig::default()).unwrap();

    run_scenario(&store, &Locator::from_file_path(&source_path).unwrap());

    let copied = std::fs::read(temp_dir.path().join("diary/img_0001.jpg")).unwrap();
    assert_eq!(copied, b"\xff\xd8\xff\xe0 jpeg");
    assert!(temp_dir.path().join("diary/backup.json").is_file());
}

#[test]
fn scenario_on_memory_root() {
    let backend = Arc::new(MemoryBackend::new("diary/"));
    let source = backend.add_source(b"jpeg".to_vec());
    let store = DiaryStore::with_backend(backend.clone(), &FolioConfig::default());

    run_scenario(&store, &source);

    let names: Vec<_> = backend.list().unwrap().iter().map(|d| d.name().clone()).collect();
    assert_eq!(names, vec!["backup.json", "img_0001.jpg"]);
}

#[test]
fn fast_path_config_on_filesystem_root() {
    let temp_dir = TempDir::new().unwrap();
    let config = FolioConfig::from_toml_str(&format!(
        "[root]\nhandle = {:?}\nprefix = \"diary\"\n\n[cache]\nfast_path_locators = true\n",
        temp_dir.path().to_string_lossy()
    ))
    .unwrap();
    let store = DiaryStore::from_config(&config).unwrap();

    let placeholder = store.attachments().create_dummy("img_0001.jpg").unwrap();
    store.attachments().reset_cache();
    assert_eq!(store.attachments().resolve("img_0001.jpg").unwrap(), placeholder);
}

#[test]
fn unconfigured_root_is_fatal() {
    let err = DiaryStore::from_config(&FolioConfig::default()).unwrap_err();
    assert!(matches!(err.kind(), FolioErrorKind::Config(_)));

    let temp_dir = TempDir::new().unwrap();
    let missing = RootLocation::new(temp_dir.path().join("revoked").to_string_lossy(), "diary");
    let err = DiaryStore::open(missing, &FolioConfig::default()).unwrap_err();
    assert!(matches!(err.kind(), FolioErrorKind::Config(_)));
}
