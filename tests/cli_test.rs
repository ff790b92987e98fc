//! Tests running the gis-regions binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const WORLD: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "Brasil" },
      "geometry": { "type": "Point", "coordinates": [-55, -15] }
    },
    {
      "type": "Feature",
      "properties": { "name": "Paris" },
      "geometry": { "type": "Polygon", "coordinates": [[[2, 48], [3, 49], [2.5, 49.5]]] }
    },
    {
      "type": "Feature",
      "properties": { "name": "Nowhere" },
      "geometry": null
    }
  ]
}"#;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gis-regions"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_world(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("world.geojson");
    fs::write(&path, WORLD).unwrap();
    path
}

fn regions(path: &Path) -> Vec<String> {
    let document: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    document["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["region"].as_str().unwrap().to_string())
        .collect()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_success_prints_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_world(&dir);

    let output = run(&[path.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).trim_end(),
        format!("Updated {} with region properties.", path.display())
    );
    assert_eq!(regions(&path), vec!["South America", "Europe", "Unknown"]);
}

#[test]
fn test_output_option_writes_elsewhere() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_world(&dir);
    let output_path = dir.path().join("tagged.geojson");

    let output = run(&[input.to_str().unwrap(), "-q", "--output", output_path.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("tagged.geojson"));
    assert_eq!(fs::read_to_string(&input).unwrap(), WORLD);
    assert_eq!(regions(&output_path), vec!["South America", "Europe", "Unknown"]);
}

#[test]
fn test_dry_run_reports_and_leaves_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_world(&dir);

    let output = run(&[path.to_str().unwrap(), "--dry-run"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim_end(), "Dry run: 3 features tagged, 1 unknown.");
    assert_eq!(fs::read_to_string(&path).unwrap(), WORLD);
}

#[test]
fn test_missing_input_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.geojson");

    let output = run(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read"));
    assert!(stderr(&output).contains("absent.geojson"));
    assert!(stdout(&output).is_empty());
    assert!(!path.exists());
}

#[test]
fn test_malformed_input_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.geojson");
    fs::write(&path, "{ \"features\": [").unwrap();

    let output = run(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"features\": [");
}

#[test]
fn test_unwritable_output_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_world(&dir);
    let output_path = dir.path().join("missing-dir").join("out.geojson");

    let output = run(&[input.to_str().unwrap(), "--output", output_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to write"));
    assert!(stdout(&output).is_empty());
    assert_eq!(fs::read_to_string(&input).unwrap(), WORLD);
}
