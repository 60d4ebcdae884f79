//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn exam() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("exam").unwrap();
    cmd.env_remove("EXAM_MODEL_PATH").env_remove("EXAM_LOG_FILE");
    cmd
}

fn bundled_model() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("student_exam_predict_pipeline.json")
}

#[test]
fn predict_example_profile() {
    exam()
        .arg("predict")
        .arg("--model")
        .arg(bundled_model())
        .args(["--age", "22", "--gender", "male", "--course", "b.tech"])
        .args(["--study-hours", "4.0", "--class-attendance", "60"])
        .args(["--internet-access", "yes", "--sleep-hours", "8.0"])
        .args(["--sleep-quality", "average", "--study-method", "mixed"])
        .args(["--facility-rating", "medium", "--exam-difficulty", "moderate"])
        .assert()
        .success()
        .stdout("Based on your profile, your predicted exam score is: 63.5\n");
}

#[test]
fn predict_uses_form_defaults() {
    exam()
        .arg("predict")
        .arg("--model")
        .arg(bundled_model())
        .assert()
        .success()
        .stdout(predicate::str::contains("predicted exam score is: 56.4"));
}

#[test]
fn predict_model_path_from_env() {
    exam()
        .env("EXAM_MODEL_PATH", bundled_model())
        .arg("predict")
        .assert()
        .success()
        .stdout(predicate::str::contains("predicted exam score is: "));
}

#[test]
fn predict_json_output() {
    let output = exam()
        .arg("predict")
        .arg("--model")
        .arg(bundled_model())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["display"], "56.4");
    assert_eq!(body["request"]["course"], "b.sc");
    assert_eq!(body["request"]["study_method"], "online videos");
    assert_eq!(body["request"].as_object().unwrap().len(), 11);
}

#[test]
fn predict_rejects_out_of_domain_values() {
    exam()
        .arg("predict")
        .arg("--model")
        .arg(bundled_model())
        .args(["--age", "60"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("age must be between 17 and 45"));

    exam()
        .arg("predict")
        .arg("--model")
        .arg(bundled_model())
        .args(["--gender", "Male"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a valid gender"));
}

#[test]
fn missing_model_fails_fast() {
    let dir = TempDir::new().unwrap();
    exam()
        .arg("predict")
        .arg("--model")
        .arg(dir.path().join("missing.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("model artifact not found"));
}

#[test]
fn corrupt_model_fails_fast() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pipeline.joblib");
    std::fs::write(&path, b"\x80\x04\x95\x00binary").unwrap();
    exam()
        .arg("inspect")
        .arg("--model")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn inspect_summarizes_the_bundled_model() {
    exam()
        .arg("inspect")
        .arg("--model")
        .arg(bundled_model())
        .assert()
        .success()
        .stdout(predicate::str::contains("exam-score-pipeline v1"))
        .stdout(predicate::str::contains("Target: exam_score"))
        .stdout(predicate::str::contains("study_method"));
}

#[test]
fn schema_lists_fields() {
    exam()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("class_attendance"))
        .stdout(predicate::str::contains("b.tech [B.TECH]"));
}
