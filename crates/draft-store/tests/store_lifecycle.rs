use draft_store::{DraftStoreConfig, FailingStorage, InMemoryStorage, KvStorage, ManualClock, PersistentDraftStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
  title: String,
  n: u32,
}

fn fresh() -> Note {
  Note { title: String::new(), n: 0 }
}

fn open(storage: &Arc<InMemoryStorage>, clock: &Arc<ManualClock>, config: DraftStoreConfig) -> PersistentDraftStore<Note> {
  PersistentDraftStore::open(config, storage.clone(), clock.clone(), fresh)
}

#[test]
fn reopen_after_debounce_restores_last_state() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  let mut store = open(&storage, &clock, DraftStoreConfig::new("k"));
  assert_eq!(store.state(), &fresh());

  assert_eq!(store.pending_deadline(), None);
  store.update(|s| s.title = "Compost".into());
  assert_eq!(store.pending_deadline(), Some(deadline_after(&clock, 600)));
  clock.advance_ms(300);
  store.update(|s| s.n = 7);
  // el primer cambio ya no dispara: el plazo se rearmó
  clock.advance_ms(400);
  assert!(!store.poll());
  clock.advance_ms(200);
  assert!(store.poll());

  let reopened = open(&storage, &clock, DraftStoreConfig::new("k"));
  assert_eq!(reopened.state(), &Note { title: "Compost".into(), n: 7 });
}

#[test]
fn version_mismatch_falls_back_to_initial() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  let mut store = open(&storage, &clock, DraftStoreConfig::new("k").with_version(1));
  store.set_state(Note { title: "v1".into(), n: 1 });
  assert!(store.flush());

  let v2 = open(&storage, &clock, DraftStoreConfig::new("k").with_version(2));
  assert_eq!(v2.state(), &fresh());
  let v1 = open(&storage, &clock, DraftStoreConfig::new("k").with_version(1));
  assert_eq!(v1.state().title, "v1");
}

#[test]
fn corrupt_record_is_treated_as_absent() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  storage.seed("k", "{\"v\":1,\"data\":");
  assert_eq!(open(&storage, &clock, DraftStoreConfig::new("k")).state(), &fresh());
  storage.seed("k", &json!({"v": 1, "data": {"otro": true}, "updated": 0}).to_string());
  assert_eq!(open(&storage, &clock, DraftStoreConfig::new("k")).state(), &fresh());
}

#[test]
fn record_without_updated_still_hydrates() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  storage.seed("k", &json!({"v": 1, "data": {"title": "Acolchado", "n": 3}}).to_string());
  let store = open(&storage, &clock, DraftStoreConfig::new("k"));
  assert_eq!(store.state(), &Note { title: "Acolchado".into(), n: 3 });
}

#[test]
fn written_record_has_expected_shape() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  let mut store = open(&storage, &clock, DraftStoreConfig::new("post_draft_1").with_version(3));
  store.update(|s| s.n = 2);
  clock.advance_ms(600);
  assert!(store.poll());

  let raw: serde_json::Value = serde_json::from_str(&storage.raw("post_draft_1").expect("record")).unwrap();
  assert_eq!(raw["v"], 3);
  assert_eq!(raw["data"], json!({"title": "", "n": 2}));
  assert_eq!(raw["updated"].as_i64().unwrap(), clock_now_ms(&clock));
}

fn deadline_after(clock: &ManualClock, ms: i64) -> chrono::DateTime<chrono::Utc> {
  use draft_store::Clock;
  clock.now() + chrono::Duration::milliseconds(ms)
}

fn clock_now_ms(clock: &ManualClock) -> i64 {
  use draft_store::Clock;
  clock.now().timestamp_millis()
}

#[test]
fn rapid_mutations_coalesce_into_one_write() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  let mut store = open(&storage, &clock, DraftStoreConfig::new("k").with_debounce_ms(600));
  for i in 1..=10 {
    store.update(|s| s.n = i);
    clock.advance_ms(100);
    assert!(!store.poll());
  }
  assert_eq!(storage.writes(), 0);
  clock.advance_ms(500);
  assert!(store.poll());
  assert!(!store.poll());
  assert_eq!(storage.writes(), 1);
  let reopened = open(&storage, &clock, DraftStoreConfig::new("k"));
  assert_eq!(reopened.state().n, 10);
}

#[test]
fn clear_without_record_resets_state() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  let mut store = open(&storage, &clock, DraftStoreConfig::new("nada"));
  store.update(|s| s.title = "temporal".into());
  store.clear();
  assert_eq!(store.state(), &fresh());
  assert!(!store.has_pending_write());
  store.clear();
  assert_eq!(storage.deletes(), 2);
  assert!(!storage.contains("nada"));
}

#[test]
fn clear_removes_persisted_record() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  let mut store = open(&storage, &clock, DraftStoreConfig::new("k"));
  store.update(|s| s.n = 5);
  store.flush();
  assert!(storage.contains("k"));
  store.clear();
  assert!(!storage.contains("k"));
  assert_eq!(open(&storage, &clock, DraftStoreConfig::new("k")).state(), &fresh());
}

#[test]
fn failing_storage_keeps_working_in_memory() {
  let storage = Arc::new(FailingStorage::new());
  let clock = Arc::new(ManualClock::default());
  let mut store = PersistentDraftStore::open(DraftStoreConfig::new("k"), storage.clone(), clock.clone(), fresh);
  store.update(|s| s.title = "sin disco".into());
  clock.advance_ms(600);
  assert!(!store.poll());
  assert_eq!(store.state().title, "sin disco");
  store.clear();
  assert_eq!(store.state(), &fresh());
  // get + set + delete
  assert_eq!(storage.attempts(), 3);
}

#[test]
fn quota_exceeded_is_swallowed() {
  let storage = Arc::new(InMemoryStorage::with_quota(32));
  let clock = Arc::new(ManualClock::default());
  let mut store = open(&storage, &clock, DraftStoreConfig::new("k"));
  store.update(|s| s.title = "un título bastante más largo que la cuota".into());
  assert!(!store.flush());
  assert!(!storage.contains("k"));
  assert_eq!(store.state().title, "un título bastante más largo que la cuota");
}

#[test]
fn reconfigure_cancels_old_write_and_targets_new_key() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  let mut store = open(&storage, &clock, DraftStoreConfig::new("a"));
  store.update(|s| s.n = 1);
  clock.advance_ms(300);
  store.reconfigure(DraftStoreConfig::new("b").with_debounce_ms(100));
  clock.advance_ms(100);
  assert!(store.poll());
  assert!(!storage.contains("a"));
  assert!(storage.contains("b"));
  assert_eq!(store.key(), "b");

  // misma configuración: no hace nada
  store.reconfigure(DraftStoreConfig::new("b").with_debounce_ms(100));
  assert!(!store.has_pending_write());
}

#[test]
fn unavailable_then_available_resumes_persisting() {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  storage.set_available(false);
  let mut store = open(&storage, &clock, DraftStoreConfig::new("k"));
  store.update(|s| s.n = 1);
  assert!(!store.flush());
  storage.set_available(true);
  store.update(|s| s.n = 2);
  assert!(store.flush());
  assert_eq!(storage.keys().unwrap(), vec!["k".to_string()]);
}
