//! Caught-list persistence against the in-memory and file storage backends.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use pokedex_tui::action::Action;
use pokedex_tui::dispatch::EffectStore;
use pokedex_tui::effect::Effect;
use pokedex_tui::reducer::reducer;
use pokedex_tui::state::AppState;
use pokedex_tui::store::{CaughtStore, FileStorage, MemoryStorage, Storage, CAUGHT_KEY};

fn memory_store() -> (CaughtStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::default());
    let store = CaughtStore::new(Box::new(Arc::clone(&storage)));
    (store, storage)
}

#[test]
fn absent_key_reads_as_empty() {
    let (store, _) = memory_store();
    assert_eq!(store.load(), Vec::<String>::new());
}

#[test]
fn save_round_trips_as_json_array() {
    let (store, storage) = memory_store();
    let names = vec!["pikachu".to_string(), "eevee".to_string()];
    store.save(&names).unwrap();

    assert_eq!(
        storage.get(CAUGHT_KEY).as_deref(),
        Some(r#"["pikachu","eevee"]"#)
    );
    assert_eq!(store.load(), names);
}

#[test]
fn clear_removes_the_key() {
    let (store, storage) = memory_store();
    store.save(&["pikachu".to_string()]).unwrap();
    store.clear().unwrap();

    assert_eq!(storage.get(CAUGHT_KEY), None);
    assert_eq!(store.load(), Vec::<String>::new());
}

#[test]
fn clear_on_empty_storage_is_ok() {
    let (store, _) = memory_store();
    assert_eq!(store.clear(), Ok(()));
}

#[test]
fn corrupt_payload_reads_as_empty() {
    let (store, storage) = memory_store();
    storage.set(CAUGHT_KEY, "not json").unwrap();
    assert_eq!(store.load(), Vec::<String>::new());
}

/// Persist effects applied in dispatch order, the way the effect handler
/// runs them: inline, one after the other.
fn apply_persist_effects(store: &CaughtStore, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::PersistCaught { names } => store.save(names).unwrap(),
            Effect::ClearCaught => store.clear().unwrap(),
            _ => {}
        }
    }
}

#[test]
fn rapid_mutations_persist_in_dispatch_order() {
    let (store, storage) = memory_store();
    let mut app = EffectStore::new(AppState::default(), reducer);

    // Two catches back to back: the durable list must end up with both
    // names, never the first write landing last.
    let first = app.dispatch(Action::Catch("pikachu".to_string()));
    apply_persist_effects(&store, &first.effects);
    let second = app.dispatch(Action::Catch("eevee".to_string()));
    apply_persist_effects(&store, &second.effects);

    assert_eq!(
        store.load(),
        vec!["pikachu".to_string(), "eevee".to_string()]
    );

    let released = app.dispatch(Action::Release("pikachu".to_string()));
    apply_persist_effects(&store, &released.effects);
    assert_eq!(store.load(), vec!["eevee".to_string()]);

    let cleared = app.dispatch(Action::CaughtClear);
    apply_persist_effects(&store, &cleared.effects);
    assert_eq!(storage.get(CAUGHT_KEY), None);
}

#[test]
fn file_storage_round_trip() {
    let root = std::env::temp_dir().join(format!("pokedex-tui-test-{}", std::process::id()));
    let storage = FileStorage::new(root.clone());

    assert_eq!(storage.get(CAUGHT_KEY), None);
    storage.set(CAUGHT_KEY, r#"["pikachu"]"#).unwrap();
    assert_eq!(storage.get(CAUGHT_KEY).as_deref(), Some(r#"["pikachu"]"#));

    storage.remove(CAUGHT_KEY).unwrap();
    assert_eq!(storage.get(CAUGHT_KEY), None);
    // Removing an absent key stays quiet.
    storage.remove(CAUGHT_KEY).unwrap();

    let _ = std::fs::remove_dir_all(root);
}
