//! Integration tests for the nimbus CLI.

use assert_cmd::Command;
use predicates::prelude::*;

/// Build a minimal version-1 NPY buffer.
fn npy_bytes(shape_text: &str, payload: &[f32]) -> Vec<u8> {
    let header = format!(
        "{{'descr': '<f4', 'fortran_order': False, 'shape': {}, }}",
        shape_text
    );
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"\x93NUMPY\x01\x00");
    bytes.extend_from_slice(&(header.len() as u16).to_le_bytes());
    bytes.extend_from_slice(header.as_bytes());
    for v in payload {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

#[test]
fn inspect_reports_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surface.npy");
    std::fs::write(&path, npy_bytes("(2, 3)", &[0.0; 6])).unwrap();

    Command::cargo_bin("nimbus")
        .unwrap()
        .args(["inspect", path.to_str().unwrap(), "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"element_count\": 6"));
}

#[test]
fn inspect_rejects_bad_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.npy");
    std::fs::write(&path, b"not an npy file").unwrap();

    Command::cargo_bin("nimbus")
        .unwrap()
        .args(["inspect", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad magic"));
}

#[test]
fn config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nimbus.json");

    Command::cargo_bin("nimbus")
        .unwrap()
        .args(["config", "init", "--output", path.to_str().unwrap()])
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("model_path"));
}

#[test]
fn run_requires_existing_model() {
    Command::cargo_bin("nimbus")
        .unwrap()
        .args(["run", "--model", "/nonexistent/model.onnx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Model file not found"));
}
