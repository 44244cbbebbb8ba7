//! CLI-level tests for the bidsync binary

use assert_cmd::Command;
use predicates::prelude::*;

fn bidsync() -> Command {
    Command::cargo_bin("bidsync").expect("binary builds")
}

#[test]
fn test_run_rejects_empty_bidder_list() {
    bidsync()
        .args([
            "run",
            "--bidders",
            "   ",
            "--prebid-repo",
            "prebid",
            "--pubfig-repo",
            "pubfig",
            "--ams-repo",
            "ams",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no bidders provided"));
}

#[test]
fn test_run_rejects_malformed_json_bidder_list() {
    bidsync()
        .args([
            "run",
            "--bidders",
            "[\"kargo\"",
            "--prebid-repo",
            "prebid",
            "--pubfig-repo",
            "pubfig",
            "--ams-repo",
            "ams",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("malformed bidder list"));
}

#[test]
fn test_dry_run_reports_plan_without_touching_repos() {
    let dir = tempfile::tempdir().expect("tempdir");
    let prebid = dir.path().join("prebid");
    let pubfig = dir.path().join("pubfig");
    let ams = dir.path().join("ams");
    for repo in [&prebid, &pubfig, &ams] {
        std::fs::create_dir(repo).expect("mkdir");
    }

    bidsync()
        .args([
            "run",
            "--bidders",
            "teads, kargo",
            "--prebid-repo",
            prebid.to_str().expect("utf8"),
            "--pubfig-repo",
            pubfig.to_str().expect("utf8"),
            "--ams-repo",
            ams.to_str().expect("utf8"),
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("chore/add-bidders-kargo-teads"))
        .stdout(predicate::str::contains("Dry run"));

    // the fixture directories stay empty
    for repo in [&prebid, &pubfig, &ams] {
        assert_eq!(std::fs::read_dir(repo).expect("read_dir").count(), 0);
    }
}

#[test]
fn test_run_rejects_missing_repository_path() {
    bidsync()
        .args([
            "run",
            "--bidders",
            "kargo",
            "--prebid-repo",
            "/nonexistent/prebid",
            "--pubfig-repo",
            "/nonexistent/pubfig",
            "--ams-repo",
            "/nonexistent/ams",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository not found"));
}

#[test]
fn test_auth_setup_prints_instructions() {
    bidsync()
        .args(["auth", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub Authentication Setup"));
}
