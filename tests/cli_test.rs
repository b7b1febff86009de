/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary and verify command-line behavior
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{PageDirBuilder, PropertyBuilder};
use predicates::prelude::*;

fn listings_dir() -> PageDirBuilder {
    PageDirBuilder::new().with_page(
        "page-1.json",
        &[
            PropertyBuilder::new("p1")
                .title("Green Nest")
                .city("Pune")
                .address("Baner Road")
                .property_type("WOMEN")
                .sharing("DOUBLE", 6000)
                .amenity("WIFI")
                .rating(4.4),
            PropertyBuilder::new("p2")
                .title("Blue Stay")
                .city("Pune")
                .address("Kothrud")
                .property_type("MEN")
                .sharing("SINGLE", 9000)
                .rating(3.9),
            PropertyBuilder::new("p3")
                .title("Metro Co-live")
                .city("Mumbai")
                .address("Andheri East")
                .property_type("COLIVE")
                .sharing("SINGLE", 15000)
                .amenity("WIFI")
                .rating(4.8),
        ],
        1,
        6,
    )
}

/// Command with no user config file in the way
fn cmd(config_home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pg-explorer"));
    cmd.env_remove("PG_EXPLORER_CONFIG")
        .env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let home = tempfile::TempDir::new().unwrap();
    cmd(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let home = tempfile::TempDir::new().unwrap();
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Filter, sort and browse PG and co-living listings"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn test_cli_version_flag() {
    let home = tempfile::TempDir::new().unwrap();
    cmd(&home).arg("--version").assert().success().stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let home = tempfile::TempDir::new().unwrap();
    cmd(&home).arg("invalid-command").assert().failure();
}

#[test]
fn test_cli_search_with_filter() {
    let home = tempfile::TempDir::new().unwrap();
    let dir = listings_dir();

    cmd(&home)
        .arg("search")
        .arg(dir.path())
        .args(["--filter", "city:pune amenity:wifi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 of 3 listings (2 active filters, sort: newest)"))
        .stdout(predicate::str::contains("Green Nest"))
        .stdout(predicate::str::contains("Blue Stay").not())
        .stdout(predicate::str::contains("Locations: Baner Road"))
        .stdout(predicate::str::contains("Next page: page=2&limit=3"));
}

#[test]
fn test_cli_search_sort_and_limit() {
    let home = tempfile::TempDir::new().unwrap();
    let dir = listings_dir();

    cmd(&home)
        .arg("search")
        .arg(dir.path())
        .args(["--sort", "price-high", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Metro Co-live"))
        .stdout(predicate::str::contains("Green Nest").not())
        .stdout(predicate::str::contains("... 2 more"));
}

#[test]
fn test_cli_search_json_output() {
    let home = tempfile::TempDir::new().unwrap();
    let dir = listings_dir();

    let output = cmd(&home)
        .arg("search")
        .arg(dir.path())
        .args(["--filter", "rating:4", "--query", "metro", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["resultCount"], 1);
    assert_eq!(json["activeFilters"], 1);
    assert_eq!(json["results"][0]["id"], "p3");
    assert_eq!(json["locations"][0], "Andheri East");
    assert_eq!(json["nextPage"], "page=2&limit=3&search=metro");
}

#[test]
fn test_cli_search_invalid_filter() {
    let home = tempfile::TempDir::new().unwrap();
    let dir = listings_dir();

    cmd(&home)
        .arg("search")
        .arg(dir.path())
        .args(["--filter", "colour:blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --filter expression"));
}

#[test]
fn test_cli_search_missing_input() {
    let home = tempfile::TempDir::new().unwrap();
    cmd(&home)
        .args(["search", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page files failed to parse"));
}

#[test]
fn test_cli_stats_command() {
    let home = tempfile::TempDir::new().unwrap();
    let dir = listings_dir();

    cmd(&home)
        .arg("stats")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total listings: 3"))
        .stdout(predicate::str::contains("Price bounds: 4800-18000"))
        .stdout(predicate::str::contains("Women only: 1"))
        .stdout(predicate::str::contains("single: 2 listings, from 9000/month"))
        .stdout(predicate::str::contains("Cities: 2"));
}

#[test]
fn test_cli_config_flag_changes_page_limit() {
    let home = tempfile::TempDir::new().unwrap();
    let dir = listings_dir();
    let config = home.path().join("explorer.toml");
    std::fs::write(&config, "page_limit = 1\ndefault_sort = \"rating\"\n").unwrap();

    cmd(&home)
        .arg("--config")
        .arg(&config)
        .arg("search")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sort: rating"))
        .stdout(predicate::str::contains("Metro Co-live"))
        .stdout(predicate::str::contains("... 2 more"));
}

#[test]
fn test_cli_config_unknown_key_rejected() {
    let home = tempfile::TempDir::new().unwrap();
    let dir = listings_dir();
    let config = home.path().join("explorer.toml");
    std::fs::write(&config, "debounce = 10\n").unwrap();

    cmd(&home).arg("--config").arg(&config).arg("search").arg(dir.path()).assert().failure();
}

#[test]
fn test_cli_logs_go_to_stderr() {
    let home = tempfile::TempDir::new().unwrap();
    let dir = listings_dir();

    cmd(&home)
        .env("PG_EXPLORER_LOG", "info")
        .args(["search", "--json"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("listing store built"))
        .stdout(predicate::str::starts_with("{"));
}
