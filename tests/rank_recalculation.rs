use serde_json::{Value, json};
use std::fs;

use event_data_sync::services::rank::RankService;
use event_data_sync::storage::{SnapshotStore, TEAM_SCORES_FILE};

fn write_scores(dir: &std::path::Path, value: &Value) {
    fs::write(
        dir.join(TEAM_SCORES_FILE),
        serde_json::to_string_pretty(value).unwrap(),
    )
    .unwrap();
}

fn read_scores(dir: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join(TEAM_SCORES_FILE)).unwrap()).unwrap()
}

fn sample() -> Value {
    json!({
        "team_scores": {
            "CRES001": [
                {
                    "id": 1, "team_id": "CRES001", "round_id": 1,
                    "score": 50, "rank": 2, "round_rank": 2
                },
                {"id": 4, "team_id": "CRES001", "round_id": 2, "score": 0, "round_rank": 7}
            ],
            "CRES002": [
                {
                    "id": 2, "team_id": "CRES002", "round_id": 1,
                    "score": 50, "rank": 1, "round_rank": 1
                },
                {"id": 5, "team_id": "CRES002", "round_id": 2, "score": 61.5}
            ],
            "CRES003": [
                {
                    "id": 3, "team_id": "CRES003", "round_id": 1,
                    "score": 30, "criteria_scores": {"idea": 10}
                }
            ]
        }
    })
}

#[test]
fn test_ranks_are_rewritten_in_place() {
    let dir = tempfile::tempdir().unwrap();
    write_scores(dir.path(), &sample());

    let report = RankService::new(SnapshotStore::open(dir.path())).run().unwrap();

    let scores = read_scores(dir.path());
    let teams = &scores["team_scores"];
    assert_eq!(teams["CRES001"][0]["round_rank"], json!(1));
    assert_eq!(teams["CRES002"][0]["round_rank"], json!(1));
    assert_eq!(teams["CRES003"][0]["round_rank"], json!(3));
    assert_eq!(teams["CRES002"][1]["round_rank"], json!(1));

    // zero score keeps its previous rank
    assert_eq!(teams["CRES001"][1]["round_rank"], json!(7));

    // passthrough fields survive
    assert_eq!(teams["CRES001"][0]["rank"], json!(2));
    assert_eq!(teams["CRES003"][0]["criteria_scores"], json!({"idea": 10}));

    assert_eq!(report.summary.rounds_ranked, 2);
    assert_eq!(report.summary.scores_ranked, 4);
    assert!(!dir.path().join(format!("{}.tmp", TEAM_SCORES_FILE)).exists());
}

fn keys(record: &Value) -> Vec<&str> {
    record.as_object().unwrap().keys().map(String::as_str).collect()
}

#[test]
fn test_key_and_team_order_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let unsorted = r#"{
  "team_scores": {
    "ZETA": [
      {"score": 40, "team_id": "ZETA", "round_rank": 9, "round_id": 1, "id": 8}
    ],
    "ALPHA": [
      {"team_id": "ALPHA", "score": 55, "round_id": 1, "criteria_scores": {"z": 1, "a": 2}}
    ]
  }
}"#;
    fs::write(dir.path().join(TEAM_SCORES_FILE), unsorted).unwrap();

    RankService::new(SnapshotStore::open(dir.path())).run().unwrap();

    let scores = read_scores(dir.path());
    let teams = scores["team_scores"].as_object().unwrap();
    assert_eq!(teams.keys().collect::<Vec<_>>(), ["ZETA", "ALPHA"]);

    let zeta = &teams["ZETA"][0];
    assert_eq!(keys(zeta), ["score", "team_id", "round_rank", "round_id", "id"]);
    assert_eq!(zeta["round_rank"], json!(2));

    // a record without round_rank gets it appended last
    let alpha = &teams["ALPHA"][0];
    assert_eq!(
        keys(alpha),
        ["team_id", "score", "round_id", "criteria_scores", "round_rank"]
    );
    assert_eq!(keys(&alpha["criteria_scores"]), ["z", "a"]);
    assert_eq!(alpha["round_rank"], json!(1));
}

#[test]
fn test_second_run_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_scores(dir.path(), &sample());
    let service = RankService::new(SnapshotStore::open(dir.path()));

    service.run().unwrap();
    let first = fs::read(dir.path().join(TEAM_SCORES_FILE)).unwrap();
    service.run().unwrap();
    let second = fs::read(dir.path().join(TEAM_SCORES_FILE)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_file_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let result = RankService::new(SnapshotStore::open(dir.path())).run();

    assert!(result.is_err());
    assert!(!dir.path().join(TEAM_SCORES_FILE).exists());
}

#[test]
fn test_malformed_file_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let broken = "{\"team_scores\": {\"A\": [";
    fs::write(dir.path().join(TEAM_SCORES_FILE), broken).unwrap();

    let result = RankService::new(SnapshotStore::open(dir.path())).run();

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(dir.path().join(TEAM_SCORES_FILE)).unwrap(), broken);
}
