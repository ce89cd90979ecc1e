use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use eb_core::{DayMonth, Domain, ResultKind, RunParameters};
use eb_results::{MissingArtifact, RunManifest, load_manifest, save_manifest, script_digest};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

#[test]
fn save_and_load_manifest() {
    let dir = unique_temp_dir("eb_results_manifest");
    fs::create_dir_all(&dir).expect("failed to create temp dir");

    let manifest = RunManifest {
        variant: "ctl".to_string(),
        config: "house".to_string(),
        domain: Domain::BuildingPlant,
        parameters: RunParameters {
            start: DayMonth::new(1, 1),
            end: DayMonth::new(31, 12),
            pre_days: 7,
            building_steps: 4,
            plant_steps: 1,
            variant: "ctl".to_string(),
            config: "house".to_string(),
        },
        timestamp: RunManifest::now_timestamp(),
        script_sha256: script_digest(b"\nc\n"),
        cpu_time: Some("CPU time: 1.0 s".to_string()),
        moved: 2,
        archived: 1,
        deleted: 0,
        missing: vec![MissingArtifact {
            kind: ResultKind::Plant,
            file_name: "ctl.plr".to_string(),
        }],
    };

    save_manifest(&dir, &manifest).expect("failed to save manifest");

    let json = fs::read_to_string(dir.join("manifest.json")).unwrap();
    assert!(json.contains("\"domain\": 3"));
    assert!(json.contains("\"kind\": \"plant\""));

    let loaded = load_manifest(&dir).expect("failed to load manifest");
    assert_eq!(loaded, manifest);
}
