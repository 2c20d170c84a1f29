//! End-to-end tests for the `shelfmap` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const PRODUCTS_CSV: &str = "\
product name,product price,product company,filter tag,quantity available,aisle row,aisle column,img url
Green Tea,3.5,Leafy,grocery,12,2,2,
Black Tea,4.0,Leafy,grocery,8,3,3,
Headphones,59.99,Sonic,electronics,3,2,6,
";

fn shelfmap(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shelfmap").unwrap();
    cmd.current_dir(dir)
        .env_remove("SHELFMAP_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// A workspace with imported products and an initialized layout
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("products.csv"), PRODUCTS_CSV).unwrap();

    shelfmap(dir.path())
        .args(["import-csv", "products.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 products"));

    shelfmap(dir.path()).arg("init").assert().success();
    dir
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_init_lists_imported_products_as_unassigned() {
    let dir = workspace();
    assert!(dir.path().join("store.shelfmap").exists());

    shelfmap(dir.path())
        .arg("aisles")
        .assert()
        .success()
        .stdout(predicate::str::contains("No aisles"))
        .stdout(predicate::str::contains("3 unassigned products"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = workspace();
    shelfmap(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_create_aisle_requires_name() {
    let dir = workspace();
    shelfmap(dir.path())
        .args(["create-aisle", "--name", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Aisle name is required"));
}

#[test]
fn test_create_and_delete_aisle() {
    let dir = workspace();
    shelfmap(dir.path())
        .args(["create-aisle", "--name", "Snacks", "--width", "2", "--category", "Toys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created aisle 'Snacks'"));

    shelfmap(dir.path())
        .args(["delete-aisle", "Snacks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    shelfmap(dir.path())
        .args(["delete-aisle", "snacks", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted aisle 'Snacks'"));
}

#[test]
fn test_directions_from_door() {
    let dir = workspace();
    shelfmap(dir.path()).args(["door", "4"]).assert().success();

    shelfmap(dir.path())
        .args(["directions", "Headphones"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Enter through the front door"))
        .stdout(predicate::str::contains("Walk right to column 6"))
        .stdout(predicate::str::contains("Follow the aisle to row 2"))
        .stdout(predicate::str::contains("Look for Headphones on the shelf"));
}

#[test]
fn test_unassigned_product_has_no_directions() {
    let dir = workspace();
    shelfmap(dir.path())
        .args(["unassign", "Green Tea"])
        .assert()
        .success();
    shelfmap(dir.path())
        .args(["directions", "green tea"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no aisle position"));
}

#[test]
fn test_search_is_case_insensitive() {
    let dir = workspace();
    shelfmap(dir.path())
        .args(["search", "TEA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Green Tea"))
        .stdout(predicate::str::contains("Black Tea"))
        .stdout(predicate::str::contains("Headphones").not());
}

#[test]
fn test_search_by_tags() {
    let dir = workspace();
    shelfmap(dir.path())
        .args(["search", "--tag", "electronics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Headphones"))
        .stdout(predicate::str::contains("Tea").not());

    shelfmap(dir.path())
        .args(["search", "--tag", "electronics", "--tag", "grocery"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Headphones"))
        .stdout(predicate::str::contains("Green Tea"))
        .stdout(predicate::str::contains("Black Tea"));

    shelfmap(dir.path())
        .args(["search", "green", "--tag", "grocery"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Green Tea"))
        .stdout(predicate::str::contains("Black Tea").not());

    shelfmap(dir.path())
        .args(["search", "tea", "--tag", "toys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tags in use: grocery, electronics"));
}

#[test]
fn test_search_needs_query_or_tag() {
    let dir = workspace();
    shelfmap(dir.path())
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tag"));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_render_svg_map_with_route() {
    let dir = workspace();
    shelfmap(dir.path())
        .args(["render", "--map", "--selected", "Black Tea", "-o", "map.svg"])
        .assert()
        .success();

    let svg = std::fs::read_to_string(dir.path().join("map.svg")).unwrap();
    assert!(svg.contains("Row 3"));
    assert!(svg.contains("stroke-dasharray=\"5,5\""));
}

#[test]
fn test_render_png() {
    let dir = workspace();
    shelfmap(dir.path())
        .args(["render", "-o", "editor.png"])
        .assert()
        .success();

    let bytes = std::fs::read(dir.path().join("editor.png")).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_assign_move_save_then_export_csv() {
    let dir = workspace();
    shelfmap(dir.path())
        .args(["create-aisle", "--name", "Audio", "--category", "electronics"])
        .assert()
        .success();
    shelfmap(dir.path())
        .args(["assign", "Headphones", "--aisle", "audio"])
        .assert()
        .success();
    shelfmap(dir.path())
        .args(["move-aisle", "Audio", "--x", "1", "--y", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to (1, 1)"));
    shelfmap(dir.path()).arg("save").assert().success();

    shelfmap(dir.path())
        .arg("export-csv")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("product name,product price"))
        .stdout(predicate::str::contains("Headphones,59.99,Sonic,electronics,3,1,1,"));

    shelfmap(dir.path())
        .args(["aisles", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"products\": 1"));
}

#[test]
fn test_missing_layout_reports_init() {
    let dir = TempDir::new().unwrap();
    shelfmap(dir.path())
        .arg("aisles")
        .assert()
        .failure()
        .stderr(predicate::str::contains("shelfmap init"));
}
