use geona_viz::error::GeonaError;
use geona_viz::state::{StateStore, validate_state};
use serde_json::json;

fn full_payload() -> serde_json::Value {
    json!({
        "map": { "projection": "EPSG:4326", "layers": ["chlor_a"] },
        "controls": { "timebar": true },
        "intro": { "seen": false }
    })
}

#[test]
fn save_then_load_returns_the_blob_verbatim() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = StateStore::open(dir.path()).expect("open store");

    let payload = full_payload();
    let id = store.save(&payload).expect("save");
    let loaded = store.load(&id).expect("load");

    assert_eq!(loaded, payload);
}

#[test]
fn saved_ids_are_distinct() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = StateStore::open(dir.path()).expect("open store");

    let first = store.save(&full_payload()).expect("save");
    let second = store.save(&full_payload()).expect("save");
    assert_ne!(first, second);
}

#[test]
fn missing_required_key_rejects_and_echoes_the_payload() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = StateStore::open(dir.path()).expect("open store");

    let payload = json!({ "map": {}, "intro": {} });
    let error = store.save(&payload).expect_err("must reject");

    match error {
        GeonaError::InvalidState { missing, payload: echoed } => {
            assert_eq!(missing, vec!["controls".to_owned()]);
            assert_eq!(echoed, payload);
        }
        other => panic!("unexpected error: {other}"),
    }

    // No partial save: the store directory stays empty.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .collect();
    assert!(entries.is_empty());
}

#[test]
fn non_object_payload_is_missing_every_key() {
    let error = validate_state(&json!([1, 2, 3])).expect_err("must reject");
    match error {
        GeonaError::InvalidState { missing, .. } => {
            assert_eq!(missing, vec!["map", "controls", "intro"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_id_is_a_hard_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = StateStore::open(dir.path()).expect("open store");

    assert!(matches!(
        store.load("nope1234"),
        Err(GeonaError::UnknownState(_))
    ));
}
