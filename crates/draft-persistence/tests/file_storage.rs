use draft_persistence::{FileStorage, PersistenceConfig};
use draft_store::{DraftStoreConfig, KvStorage, ManualClock, PersistentDraftStore, StoreError};
use serde_json::json;
use std::sync::Arc;

fn storage_in(dir: &tempfile::TempDir, max: Option<usize>) -> FileStorage {
  let cfg = PersistenceConfig { dir: dir.path().join("drafts"), max_record_bytes: max };
  FileStorage::new(&cfg).expect("file storage")
}

#[test]
fn set_get_delete_and_list() {
  let dir = tempfile::tempdir().unwrap();
  let fs = storage_in(&dir, None);
  assert_eq!(fs.get("post_draft_1").unwrap(), None);
  fs.set("post_draft_1", "{}").unwrap();
  fs.set("question_draft_2", "[]").unwrap();
  fs.set("post_draft_1", "{\"v\":1}").unwrap();
  assert_eq!(fs.get("post_draft_1").unwrap().as_deref(), Some("{\"v\":1}"));
  assert_eq!(fs.keys().unwrap(), vec!["post_draft_1".to_string(), "question_draft_2".to_string()]);
  fs.delete("post_draft_1").unwrap();
  // idempotente
  fs.delete("post_draft_1").unwrap();
  assert_eq!(fs.keys().unwrap(), vec!["question_draft_2".to_string()]);
}

#[test]
fn oversized_record_is_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let fs = storage_in(&dir, Some(8));
  let err = fs.set("k", "0123456789").unwrap_err();
  assert!(matches!(err, StoreError::QuotaExceeded { size: 10, limit: 8, .. }));
  assert_eq!(fs.get("k").unwrap(), None);
}

#[test]
fn draft_survives_a_restart_on_disk() {
  let dir = tempfile::tempdir().unwrap();
  let clock = Arc::new(ManualClock::default());
  {
    let storage = Arc::new(storage_in(&dir, None));
    let mut store = PersistentDraftStore::open(DraftStoreConfig::new("practice_draft_x"),
                                               storage,
                                               clock.clone(),
                                               || json!({"title": ""}));
    store.set_state(json!({"title": "Rotación de cultivos"}));
    clock.advance_ms(600);
    assert!(store.poll());
  }
  let storage = Arc::new(storage_in(&dir, None));
  let store = PersistentDraftStore::open(DraftStoreConfig::new("practice_draft_x"),
                                         storage,
                                         clock.clone(),
                                         || json!({"title": ""}));
  assert_eq!(store.state()["title"], "Rotación de cultivos");
}
