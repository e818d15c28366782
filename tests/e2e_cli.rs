//! End-to-end CLI flows.
//!
//! Each test drives the `qcart` binary against a fixture catalog written
//! to a temp dir and asserts on stdout/stderr and exit status.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = r#"[
    {"id":1,"name":"Red Shoes","price":1999,"category":"Footwear"},
    {"id":2,"name":"Blue Shirt","brand":"Plainwear","price":899,"category":"Apparel"},
    {"id":3,"name":"Phone Alpha","price":9000,"category":"Electronics",
     "description":"Budget phone with a good camera"},
    {"id":4,"name":"Phone Beta","price":22000,"category":"Electronics"}
]"#;

fn fixture_dir() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    fs::write(&path, FIXTURE).unwrap();
    (dir, path)
}

fn qcart() -> Command {
    Command::cargo_bin("qcart").unwrap()
}

// =============================================================================
// Ingest
// =============================================================================

#[test]
fn ingest_reports_product_count() {
    let (_dir, path) = fixture_dir();
    qcart()
        .arg("ingest")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 4 products"));
}

#[test]
fn ingest_missing_file_fails_with_path_on_stderr() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.json");
    qcart()
        .arg("ingest")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn ingest_bare_object_fails_with_array_message() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    fs::write(&path, r#"{"id":1,"name":"Red Shoes"}"#).unwrap();
    qcart()
        .arg("ingest")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("top-level JSON array"));
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn search_scenario_red_shoes() {
    let (_dir, path) = fixture_dir();
    qcart()
        .arg("search")
        .arg(&path)
        .arg("shoe")
        .assert()
        .success()
        .stdout(predicate::str::contains("Red Shoes"))
        .stdout(predicate::str::contains("Blue Shirt").not())
        .stdout(predicate::str::contains("1 match(es)"));
}

#[test]
fn search_matches_description() {
    let (_dir, path) = fixture_dir();
    qcart()
        .arg("search")
        .arg(&path)
        .arg("good camera")
        .assert()
        .success()
        .stdout(predicate::str::contains("Phone Alpha"));
}

#[test]
fn search_empty_query_prints_zero_matches() {
    let (_dir, path) = fixture_dir();
    qcart()
        .arg("search")
        .arg(&path)
        .arg("")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 match(es)"));
}

#[test]
fn search_no_hits_still_exits_zero() {
    let (_dir, path) = fixture_dir();
    qcart()
        .arg("search")
        .arg(&path)
        .arg("submarine")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 match(es)"));
}

#[test]
fn search_budget_phrase_filters_results() {
    let (_dir, path) = fixture_dir();
    qcart()
        .arg("search")
        .arg(&path)
        .arg("phone under 10k")
        .assert()
        .success()
        .stdout(predicate::str::contains("Phone Alpha"))
        .stdout(predicate::str::contains("Phone Beta").not());
}

#[test]
fn search_budget_flag_overrides_phrase() {
    let (_dir, path) = fixture_dir();
    qcart()
        .arg("search")
        .arg(&path)
        .arg("phone under 10k")
        .arg("--budget")
        .arg("30000")
        .assert()
        .success()
        .stdout(predicate::str::contains("Phone Alpha"))
        .stdout(predicate::str::contains("Phone Beta"));
}

#[test]
fn search_price_sort_descending() {
    let (_dir, path) = fixture_dir();
    let output = qcart()
        .arg("search")
        .arg(&path)
        .arg("phone")
        .arg("--sort")
        .arg("price-desc")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let beta = stdout.find("Phone Beta").expect("Phone Beta in output");
    let alpha = stdout.find("Phone Alpha").expect("Phone Alpha in output");
    assert!(beta < alpha, "price-desc should list Beta before Alpha");
}

#[test]
fn search_limit_caps_output() {
    let (_dir, path) = fixture_dir();
    qcart()
        .arg("search")
        .arg(&path)
        .arg("phone")
        .arg("--limit")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 match(es)"));
}

#[test]
fn search_invalid_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    fs::write(&path, "{ broken").unwrap();
    qcart()
        .arg("search")
        .arg(&path)
        .arg("shoe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("products.json"));
}

// =============================================================================
// Auxiliary commands
// =============================================================================

#[test]
fn completions_generate_for_bash() {
    qcart()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("qcart"));
}

#[test]
fn man_page_renders() {
    qcart()
        .arg("man")
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}
