mod common;

use campusshift::algorithm::{generate, GeneratorConfig};
use campusshift::models::Preferences;
use campusshift::storage::ScheduleStore;
use common::{campus, request, section};

fn candidates() -> Vec<campusshift::models::ScheduleCandidate> {
    let a = section("ICS 101", "10001", "63", &[("Sunday", "08:00", "09:15")]);
    let b = section("MATH 101", "20001", "24", &[("Sunday", "09:30", "10:45")]);
    let requests = vec![request("ICS 101", vec![a]), request("MATH 101", vec![b])];
    generate(&requests, &Preferences::default(), &campus(), &GeneratorConfig::default()).unwrap()
}

#[test]
fn test_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("schedules.db");
    let cands = candidates();

    let saved = {
        let store = ScheduleStore::open(&db_path).unwrap();
        store.save_schedule("alice", "Plan A", "Fall", 2024, &cands[0]).unwrap()
    };
    assert!(db_path.exists());

    let store = ScheduleStore::open(&db_path).unwrap();
    let loaded = store.get_schedule("alice", saved.id).unwrap().unwrap();
    assert_eq!(loaded.sections, cands[0].sections);
    assert_eq!(loaded.total_walking_time, cands[0].total_walking_time);
    assert_eq!(loaded.score, cands[0].score);
    assert_eq!(loaded.preferences, cands[0].preferences);
    assert_eq!(store.usage("alice").unwrap().schedules_generated, 1);
}

#[test]
fn test_saved_schedule_keeps_walking_and_crns() {
    let store = ScheduleStore::open_in_memory().unwrap();
    let cands = candidates();
    // el mejor es uno de los singletons (sin caminata); el par camina 6 minutos
    let pair = cands.iter().find(|c| c.sections.len() == 2).unwrap();
    assert_eq!(pair.total_walking_time, 6);

    let saved = store.save_schedule("bob", "pair", "Fall", 2024, pair).unwrap();
    assert_eq!(store.schedule_crns("bob", saved.id).unwrap().unwrap(), vec!["10001", "20001"]);
    assert!(store.schedule_crns("alice", saved.id).unwrap().is_none());
}

#[test]
fn test_list_limit_is_fifty() {
    let store = ScheduleStore::open_in_memory().unwrap();
    let cand = &candidates()[0];
    for i in 0..55 {
        store.save_schedule("carol", &format!("plan {}", i), "Fall", 2024, cand).unwrap();
    }
    let list = store.list_schedules("carol", None, None).unwrap();
    assert_eq!(list.len(), 50);
    assert_eq!(list[0].name, "plan 54");
    assert_eq!(store.usage("carol").unwrap().schedules_generated, 55);
}
