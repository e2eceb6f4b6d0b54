// ABOUTME: Tests for CLI input documents and the mealwave-cli binary end to end
// ABOUTME: Loads JSON inputs from temp files and checks stdout/stderr envelopes of each command
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::steady_history;
use mealwave::errors::ErrorCode;
use mealwave::input::{load_json, PlanInput, ThresholdsInput, WaveInput};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn plan_document() -> Value {
    json!({
        "person_id": "6f1c0b6e-8a0e-4c55-9a55-3f0f1f6b9d21",
        "current_time": "20:00",
        "day_target": { "protein": 150.0, "carbs": 200.0, "fat": 65.0, "kcal": 2000.0 },
        "day_eaten": { "protein": 90.0, "carbs": 120.0, "fat": 39.0, "kcal": 1200.0 },
    })
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_vec_pretty(value)?)?;
    Ok(path)
}

fn run_cli(args: &[&str], input: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mealwave-cli"))
        .args(args)
        .arg("--input")
        .arg(input)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run mealwave-cli")
}

#[tokio::test]
async fn test_plan_input_flattens_request() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_json(&dir, "plan.json", &plan_document())?;

    let input: PlanInput = load_json(&path).await?;
    assert!(input.person_id.is_some());
    assert_eq!(input.person_id(), input.person_id.unwrap());
    let now = input.request.current_time.unwrap();
    assert!((now.hours() - 20.0).abs() < 1e-9);
    assert!((input.request.day_eaten.kcal - 1200.0).abs() < f64::EPSILON);
    assert!(input.catalog.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_thresholds_input_round_trips_history() -> Result<()> {
    let dir = TempDir::new()?;
    let document = json!({ "history": steady_history(5) });
    let path = write_json(&dir, "history.json", &document)?;

    let input: ThresholdsInput = load_json(&path).await?;
    assert_eq!(input.history.len(), 5);
    assert!(input.profile.is_none());
    assert!(input.person_id.is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let err = load_json::<WaveInput>(&dir.path().join("absent.json"))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.details["path"].as_str().unwrap().ends_with("absent.json"));
}

#[tokio::test]
async fn test_malformed_document_is_invalid_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\n  \"day\": ").unwrap();

    let err = load_json::<WaveInput>(&path).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
    assert_eq!(err.details["line"], json!(2));
}

#[test]
fn test_cli_plan_prints_plan() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_json(&dir, "plan.json", &plan_document())?;

    let output = run_cli(&["plan"], &path);
    assert!(output.status.success());

    let plan: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(plan["available"], json!(true));
    assert_eq!(plan["meals"].as_array().unwrap().len(), 1);
    assert_eq!(plan["meals"][0]["time_start"], json!("20:00"));
    Ok(())
}

#[test]
fn test_cli_wave_prints_each_meal() -> Result<()> {
    let dir = TempDir::new()?;
    let document = json!({ "day": steady_history(1)[0] });
    let path = write_json(&dir, "day.json", &document)?;

    let output = run_cli(&["wave"], &path);
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["waves"].as_array().unwrap().len(), 3);
    assert!(body["baseline_hours"].as_f64().unwrap() > 0.0);
    Ok(())
}

#[test]
fn test_cli_thresholds_reports_cache_status() -> Result<()> {
    let dir = TempDir::new()?;
    let document = json!({ "history": steady_history(9) });
    let path = write_json(&dir, "history.json", &document)?;

    let output = run_cli(&["thresholds"], &path);
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["cache"]["status"], json!("computed"));
    assert_eq!(body["thresholds"]["tier"], json!("partial"));
    Ok(())
}

#[test]
fn test_cli_error_envelope_on_stderr() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["plan"], &dir.path().join("missing.json"));

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let start = stderr.find("{\n").unwrap();
    let envelope: Value = serde_json::from_str(&stderr[start..]).unwrap();
    assert_eq!(envelope["error"]["code"], json!("INVALID_INPUT"));
}
