use labormarket_core::{
    collector::ModelSample,
    event::EventLogEntry,
    store::SimStore,
};
use std::path::PathBuf;

fn temp_db(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("{name}-{}-{nanos}.db", std::process::id()))
}

fn remove_db(path: &PathBuf) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

fn entry(run_id: &str, step: u64, event_type: &str) -> EventLogEntry {
    EventLogEntry {
        id:         None,
        run_id:     run_id.to_string(),
        step,
        agent_id:   None,
        event_type: event_type.to_string(),
        payload:    "{}".to_string(),
    }
}

#[test]
fn file_store_opens_in_wal_mode_and_persists() {
    let path = temp_db("labormarket-store");
    let path_str = path.to_str().unwrap();

    {
        let mut store = SimStore::open(path_str).unwrap();
        store.migrate().unwrap();
        store.insert_run("file-run", 9, "test", "1970-01-01T00:00:00Z").unwrap();
        store.append_event(&entry("file-run", 0, "run_initialized")).unwrap();
        store
            .append_events(&[entry("file-run", 1, "step_started"), entry("file-run", 1, "step_completed")])
            .unwrap();
        store
            .insert_step_summary(
                "file-run",
                &ModelSample {
                    step:              1,
                    employed:          4,
                    unemployed:        1,
                    open_vacancies:    2,
                    resolution_misses: 0,
                },
            )
            .unwrap();
    }

    let mode: String = rusqlite::Connection::open(&path)
        .unwrap()
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");

    // Reopen and migrate again: the schema is idempotent and the data survives.
    let store = SimStore::open(path_str).unwrap();
    store.migrate().unwrap();
    assert_eq!(store.event_count("file-run", "run_initialized").unwrap(), 1);
    let step_one = store.events_for_step("file-run", 1).unwrap();
    let types: Vec<_> = step_one.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(types, ["step_started", "step_completed"]);
    assert_eq!(store.step_summaries("file-run").unwrap()[0].employed, 4);

    drop(store);
    remove_db(&path);
}

#[test]
fn memory_path_opens_like_the_cli_default() {
    let store = SimStore::open(":memory:").unwrap();
    store.migrate().unwrap();
    store.insert_run("mem-run", 1, "test", "1970-01-01T00:00:00Z").unwrap();
    store.append_event(&entry("mem-run", 0, "run_initialized")).unwrap();
    assert_eq!(store.event_count("mem-run", "run_initialized").unwrap(), 1);
}

#[test]
fn events_require_a_known_run() {
    let store = SimStore::in_memory().unwrap();
    store.migrate().unwrap();
    assert!(store.append_event(&entry("no-such-run", 0, "run_initialized")).is_err());
}
