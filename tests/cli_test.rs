//! Binary smoke tests for the offline subcommands.

use std::process::Command;
use tempfile::TempDir;

const SAMPLE: &str = r#"{
    "linkage": [0, 1, 0.2, 2, 2, 3, 0.5, 3],
    "vocab_freq": [
        ["a", 10, ["1-1"]],
        ["b", 20, ["1-1"]],
        ["c", 30, ["2-5"]]
    ],
    "hymns": {"1-1": "first hymn text", "2-5": "third hymn text"}
}"#;

fn write_data(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("data.json");
    std::fs::write(&path, SAMPLE).unwrap();
    path
}

#[test]
fn cut_prints_the_assignment() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_vedalex"))
        .current_dir(dir.path())
        .args(["cut", "0.7", "--data"])
        .arg(&data)
        .output()
        .expect("failed to run cut command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["a"]["cluster"], 0);
    assert_eq!(parsed["b"]["cluster"], 0);
    assert_eq!(parsed["c"]["cluster"], 1);
}

#[test]
fn cut_rejects_out_of_range_similarity() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_vedalex"))
        .current_dir(dir.path())
        .args(["cut", "1.5", "--data"])
        .arg(&data)
        .output()
        .expect("failed to run cut command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("between 0 and 1"));
}

#[test]
fn hymn_prints_the_record() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_vedalex"))
        .current_dir(dir.path())
        .args(["hymn", "1-1", "--data"])
        .arg(&data)
        .output()
        .expect("failed to run hymn command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("first hymn text"));
}

#[test]
fn hymn_fails_for_unknown_id() {
    let dir = TempDir::new().unwrap();
    let data = write_data(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_vedalex"))
        .current_dir(dir.path())
        .args(["hymn", "99-1", "--data"])
        .arg(&data)
        .output()
        .expect("failed to run hymn command");

    assert!(!output.status.success());
}

#[test]
fn malformed_data_is_fatal() {
    let dir = TempDir::new().unwrap();
    // Flat length not a multiple of four.
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"{"linkage": [0, 1, 0.2], "vocab_freq": [["a", 1, []]], "hymns": {}}"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_vedalex"))
        .current_dir(dir.path())
        .args(["cut", "0.5", "--data"])
        .arg(&path)
        .output()
        .expect("failed to run cut command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("malformed linkage"));
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_vedalex"))
        .current_dir(dir.path())
        .arg("init")
        .output()
        .expect("failed to run init command");
    assert!(output.status.success());

    let config_path = dir.path().join("vedalex.toml");
    assert!(config_path.exists());
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[server]"));
    assert!(content.contains("port = 8000"));

    // Second run without --force must refuse.
    let output = Command::new(env!("CARGO_BIN_EXE_vedalex"))
        .current_dir(dir.path())
        .arg("init")
        .output()
        .expect("failed to run init command");
    assert!(!output.status.success());
}
