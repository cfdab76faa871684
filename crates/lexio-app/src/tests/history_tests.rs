use lexio_store::SqliteStore;

use crate::history;
use crate::telemetry::init_telemetry;

fn store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("in-memory store");
    store.init_schema(history::SCHEMA).expect("schema");
    store
}

#[tokio::test]
async fn record_lookup_writes_row_and_counter_together() {
    let mut store = store();

    history::record_lookup(&mut store, "hello").await.unwrap();
    history::record_lookup(&mut store, "world").await.unwrap();

    assert_eq!(
        store
            .query_i64("SELECT COUNT(*) FROM lookup_history")
            .unwrap(),
        2
    );
    assert_eq!(store.query_i64("SELECT total FROM lookup_stats").unwrap(), 2);
}

#[tokio::test]
async fn schema_init_is_idempotent() {
    let store = store();
    store.init_schema(history::SCHEMA).unwrap();

    // Seed row must not duplicate.
    assert_eq!(
        store.query_i64("SELECT COUNT(*) FROM lookup_stats").unwrap(),
        1
    );
}

#[test]
fn telemetry_init_is_idempotent() {
    init_telemetry();
    init_telemetry();
}
