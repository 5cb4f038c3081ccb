use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs, path::PathBuf};

fn hana_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../engine/content/characters/hana.json")
}

fn yokai() -> Command {
    Command::cargo_bin("yokai").unwrap()
}

#[test]
fn roll_prints_a_card() {
    yokai()
        .args(["roll", "--attribute", "wisdom", "--value", "2", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hunter: Roll of Wisdom"))
        .stdout(predicate::str::contains("Total Result: "));
}

#[test]
fn roll_is_deterministic_per_seed() {
    let run = || {
        yokai()
            .args(["roll", "--attribute", "courage", "--value", "3", "--curse", "--rolls", "3", "--json"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn exhausted_roll_is_forced_to_disadvantage() {
    yokai()
        .args(["roll", "--attribute", "sharpness", "--remaining", "0", "--curse"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Roll with Disadvantage"));
}

#[test]
fn tiers_report_rejections() {
    yokai()
        .args(["tiers", "--current", "5,0,5,0", "--previous", "5,0,3,0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[WARN] Wisdom cannot exceed 4: a higher tier is already taken.",
        ));
}

#[test]
fn tiers_need_four_values() {
    yokai()
        .args(["tiers", "--current", "5,0,5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 4"));
}

#[test]
fn new_npc_as_yaml() {
    yokai()
        .args(["new-npc", "--name", "Kappa", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("type: npcYokai"))
        .stdout(predicate::str::contains("name: Kappa"));
}

#[test]
fn set_clamps_and_saves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hana.json");
    fs::copy(hana_path(), &path).unwrap();

    yokai()
        .args(["set", "--file"])
        .arg(&path)
        .args(["--field", "system.health.max", "--value", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[WARN] Maximum health cannot exceed 15."));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["system"]["health"]["max"], 15);
}

#[test]
fn sheet_roll_rejects_unknown_equipment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hana.json");
    fs::copy(hana_path(), &path).unwrap();

    yokai()
        .args(["sheet-roll", "--attribute", "courage", "--equipment", "Naginata", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no equipment named 'Naginata'"));
}

#[test]
fn sheet_roll_applies_equipment_bonus() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hana.json");
    fs::copy(hana_path(), &path).unwrap();

    yokai()
        .args(["sheet-roll", "--attribute", "courage", "--equipment", "katana", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Hana Sakurai: Roll of Courage"))
        .stdout(predicate::str::contains("Encumbrance Penalty: -2"))
        .stdout(predicate::str::contains("Equipment: +2"));
}

#[test]
fn options_read_bom_prefixed_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hana.json");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend(fs::read(hana_path()).unwrap());
    fs::write(&path, bytes).unwrap();

    yokai()
        .args(["options", "--attribute", "wisdom", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"None\""))
        .stdout(predicate::str::contains("\"label\": \"Katana (+2)\""));
}

#[test]
fn simulate_rolls_reports_distribution() {
    Command::cargo_bin("simulate-rolls")
        .unwrap()
        .args(["--attribute", "wisdom", "--value", "3", "--trials", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("success:"))
        .stdout(predicate::str::contains("bad omen:"));
}
