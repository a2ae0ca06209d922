// Drives the binary's non-interactive paths. Config and log locations are
// pointed into a temp dir so the user's own settings are never touched.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

const GOOD_BANK: &str = r#"[
    {"id": 3, "text": "Q3", "options": {"A": "a", "B": "b", "C": "c", "D": "d", "E": "e"}, "correctAnswer": "A"},
    {"id": 7, "text": "Q7", "options": {"A": "a", "B": "b", "C": "c", "D": "d", "E": "e"}, "correctAnswer": "E", "explanation": "E."}
]"#;

const DUPLICATE_BANK: &str = r#"[
    {"id": 3, "text": "Q3", "options": {"A": "a", "B": "b", "C": "c", "D": "d", "E": "e"}, "correctAnswer": "A"},
    {"id": 3, "text": "Q3 again", "options": {"A": "a", "B": "b", "C": "c", "D": "d", "E": "e"}, "correctAnswer": "B"}
]"#;

fn examsim(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("examsim").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("EXAMSIM_LOG");
    cmd
}

fn write_bank(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("bank.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn validate_builtin_bank() {
    let home = TempDir::new().unwrap();
    let out = examsim(home.path())
        .arg("--validate")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(out).unwrap();
    assert!(stdout.contains("ok: 10 questions"), "stdout: {stdout}");
    assert!(stdout.contains("150 min"), "stdout: {stdout}");
}

#[test]
fn validate_bank_file_with_duration_override() {
    let home = TempDir::new().unwrap();
    let bank = write_bank(&home, GOOD_BANK);
    let out = examsim(home.path())
        .args(["--validate", "-d", "45", "--questions"])
        .arg(&bank)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(out).unwrap();
    assert!(stdout.contains("ok: 2 questions (ids 3, 7)"), "stdout: {stdout}");
    assert!(stdout.contains("45 min"), "stdout: {stdout}");
}

#[test]
fn duplicate_ids_are_rejected() {
    let home = TempDir::new().unwrap();
    let bank = write_bank(&home, DUPLICATE_BANK);
    let out = examsim(home.path())
        .arg("--validate")
        .arg("--questions")
        .arg(&bank)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("duplicate question id 3"), "stderr: {stderr}");
}

#[test]
fn missing_bank_file_is_rejected() {
    let home = TempDir::new().unwrap();
    let out = examsim(home.path())
        .args(["--validate", "--questions"])
        .arg(home.path().join("nope.json"))
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("failed to read question bank"), "stderr: {stderr}");
}

#[test]
fn zero_duration_is_rejected() {
    let home = TempDir::new().unwrap();
    examsim(home.path())
        .args(["--validate", "-d", "0"])
        .assert()
        .failure();
}

#[test]
fn save_config_persists_duration() {
    let home = TempDir::new().unwrap();
    examsim(home.path())
        .args(["--validate", "--save-config", "-d", "30"])
        .assert()
        .success();

    let saved = home.path().join("config").join("examsim").join("config.json");
    let json = fs::read_to_string(&saved).unwrap();
    assert!(json.contains("1800"), "config: {json}");

    // picked up on the next run without -d
    let out = examsim(home.path())
        .arg("--validate")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8(out).unwrap().contains("30 min"));
}

#[test]
fn interactive_mode_requires_tty() {
    let home = TempDir::new().unwrap();
    let out = examsim(home.path())
        .write_stdin("")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("stdin must be a tty"), "stderr: {stderr}");
}
