use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use soulpixel_core::{
    MemoryThoughtStorage, Mood, RawThought, StorageError, StorageResult, StoreConfig, StoreError,
    Thought, ThoughtStorage, ThoughtStore,
};

fn empty_store() -> ThoughtStore<MemoryThoughtStorage, ChaCha20Rng> {
    ThoughtStore::load_with_rng(
        MemoryThoughtStorage::new(),
        StoreConfig::default(),
        ChaCha20Rng::seed_from_u64(42),
    )
    .unwrap()
}

fn store_with(texts: &[&str]) -> ThoughtStore<MemoryThoughtStorage, ChaCha20Rng> {
    let mut store = empty_store();
    for text in texts {
        store.submit(text, None).unwrap();
    }
    store
}

fn texts(store: &ThoughtStore<MemoryThoughtStorage, ChaCha20Rng>) -> Vec<&str> {
    store.thoughts().iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn absent_slot_loads_empty_board_without_saving() {
    let store = empty_store();
    assert!(store.is_empty());
    assert_eq!(store.expanded(), None);
    assert!(!store.migration_pending());
    assert_eq!(store.storage().save_count(), 0);
}

#[test]
fn submit_appends_record_with_fresh_position() {
    let mut store = empty_store();

    let index = store.submit("hello", Some(Mood::Happy)).unwrap();
    assert_eq!(index, Some(0));
    assert_eq!(store.len(), 1);

    let thought = &store.thoughts()[0];
    assert_eq!(thought.text, "hello");
    assert_eq!(thought.mood, Some(Mood::Happy));
    assert!(thought.comments.is_empty());
    assert!((10.0..=80.0).contains(&thought.position.top()));
    assert!((5.0..=85.0).contains(&thought.position.left()));
    assert_eq!(store.storage().save_count(), 1);

    let raw: serde_json::Value = serde_json::from_str(store.storage().raw().unwrap()).unwrap();
    assert_eq!(raw[0]["text"], "hello");
    assert_eq!(raw[0]["mood"], "😊");
    assert_eq!(raw[0]["comments"], serde_json::json!([]));
}

#[test]
fn submit_trims_text() {
    let mut store = empty_store();
    store.submit("  spaced out \n", None).unwrap();
    assert_eq!(store.thoughts()[0].text, "spaced out");
}

#[test]
fn blank_submission_is_silent_noop() {
    let mut store = store_with(&["keep"]);
    let before = store.thoughts().to_vec();
    let saves = store.storage().save_count();

    assert_eq!(store.submit("", Some(Mood::Sad)).unwrap(), None);
    assert_eq!(store.submit("   ", None).unwrap(), None);

    assert_eq!(store.thoughts(), before.as_slice());
    assert_eq!(store.storage().save_count(), saves);
}

#[test]
fn every_submission_stays_in_domain() {
    let mut store = empty_store();
    for i in 0..30 {
        store.submit(&format!("thought {i}"), None).unwrap();
    }
    for thought in store.thoughts() {
        assert!((10.0..=80.0).contains(&thought.position.top()));
        assert!((5.0..=85.0).contains(&thought.position.left()));
    }
}

#[test]
fn delete_preserves_order_and_clears_focus() {
    let mut store = store_with(&["a", "b", "c", "d", "e"]);
    store.toggle_expanded(2).unwrap();

    let removed = store.delete(2).unwrap();
    assert_eq!(removed.text, "c");
    assert_eq!(texts(&store), vec!["a", "b", "d", "e"]);
    assert_eq!(store.expanded(), None);

    let raw: serde_json::Value = serde_json::from_str(store.storage().raw().unwrap()).unwrap();
    assert_eq!(raw.as_array().unwrap().len(), 4);
}

#[test]
fn delete_keeps_focus_on_same_card() {
    let mut store = store_with(&["a", "b", "c", "d", "e"]);

    store.toggle_expanded(1).unwrap();
    store.delete(3).unwrap();
    assert_eq!(store.expanded(), Some(1));

    store.toggle_expanded(3).unwrap();
    store.delete(0).unwrap();
    assert_eq!(store.expanded(), Some(2));
    assert_eq!(store.thoughts()[2].text, "e");
}

#[test]
fn delete_out_of_range_is_rejected() {
    let mut store = store_with(&["only"]);
    let err = store.delete(5).unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 5, len: 1 }));
    assert_eq!(store.len(), 1);
}

#[test]
fn add_comment_appends_and_ignores_blank() {
    let mut store = store_with(&["target"]);
    store.add_comment(0, "a").unwrap();
    store.add_comment(0, "b").unwrap();

    assert!(store.add_comment(0, "  nice  ").unwrap());
    assert_eq!(store.thoughts()[0].comments, vec!["a", "b", "nice"]);

    let saves = store.storage().save_count();
    assert!(!store.add_comment(0, "   ").unwrap());
    assert_eq!(store.thoughts()[0].comments, vec!["a", "b", "nice"]);
    assert_eq!(store.storage().save_count(), saves);
}

#[test]
fn toggle_expanded_switches_and_collapses() {
    let mut store = store_with(&["a", "b"]);
    assert_eq!(store.toggle_expanded(0).unwrap(), Some(0));
    assert_eq!(store.toggle_expanded(1).unwrap(), Some(1));
    assert_eq!(store.toggle_expanded(1).unwrap(), None);
    assert!(store.toggle_expanded(2).is_err());

    store.toggle_expanded(0).unwrap();
    store.collapse();
    assert_eq!(store.expanded(), None);
}

#[test]
fn saved_collection_reloads_identically() {
    let mut store = store_with(&["one", "two"]);
    store.submit("three", Some(Mood::Overwhelmed)).unwrap();
    store.add_comment(1, "reply").unwrap();
    let expected: Vec<Thought> = store.thoughts().to_vec();

    let storage = store.into_storage();
    let reloaded = ThoughtStore::load_with_rng(
        storage,
        StoreConfig::default(),
        ChaCha20Rng::seed_from_u64(99),
    )
    .unwrap();

    assert_eq!(reloaded.thoughts(), expected.as_slice());
    assert!(!reloaded.migration_pending());
}

#[test]
fn malformed_snapshot_fails_load_and_falls_back_to_empty() {
    let err = ThoughtStore::load(MemoryThoughtStorage::with_raw("[{oops"), StoreConfig::default())
        .err()
        .expect("malformed snapshot must fail load");
    assert!(matches!(err, StoreError::Storage(StorageError::Parse(_))));

    let mut store = ThoughtStore::load_or_default(
        MemoryThoughtStorage::with_raw("[{oops"),
        StoreConfig::default(),
    );
    assert!(store.is_empty());

    store.submit("fresh start", None).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.storage().raw().unwrap().contains("fresh start"));
}

/// Storage whose writes always fail.
struct ReadOnlyStorage;

impl ThoughtStorage for ReadOnlyStorage {
    fn load(&self) -> StorageResult<Vec<RawThought>> {
        Ok(vec![RawThought::Legacy("existing".to_string())])
    }

    fn save(&mut self, _thoughts: &[Thought]) -> StorageResult<()> {
        let err = serde_json::from_str::<serde_json::Value>("x").unwrap_err();
        Err(StorageError::Parse(err))
    }
}

#[test]
fn failed_save_rolls_mutation_back() {
    let mut store = ThoughtStore::load_with_rng(
        ReadOnlyStorage,
        StoreConfig::default(),
        ChaCha20Rng::seed_from_u64(1),
    )
    .unwrap();

    assert!(store.submit("new", None).is_err());
    assert_eq!(store.len(), 1);

    assert!(store.add_comment(0, "hi").is_err());
    assert!(store.thoughts()[0].comments.is_empty());

    store.toggle_expanded(0).unwrap();
    assert!(store.delete(0).is_err());
    assert_eq!(store.thoughts()[0].text, "existing");
    assert_eq!(store.expanded(), Some(0));
}

#[test]
fn store_works_through_borrowed_storage() {
    let mut storage = MemoryThoughtStorage::new();
    {
        let mut store = ThoughtStore::load_with_rng(
            &mut storage,
            StoreConfig::default(),
            ChaCha20Rng::seed_from_u64(8),
        )
        .unwrap();
        store.submit("borrowed", Some(Mood::Calm)).unwrap();
    }
    assert_eq!(storage.save_count(), 1);
    assert!(storage.raw().unwrap().contains("🧘"));
}
