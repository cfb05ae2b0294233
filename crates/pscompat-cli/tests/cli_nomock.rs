//! End-to-end tests for the pscompat binary against a real profile document.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn pscompat() -> Command {
    let mut cmd = Command::cargo_bin("pscompat").expect("pscompat binary should exist");
    cmd.env_remove("PSCOMPAT_PROFILE_DIR")
        .env_remove("PSCOMPAT_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../pscompat-profile/tests/fixtures/ubuntu_x64_18.04_core.json")
        .to_string_lossy()
        .into_owned()
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("command runs");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

mod inspect {
    use super::*;

    #[test]
    fn check_reports_identity() {
        pscompat()
            .args(["check", &fixture()])
            .assert()
            .success()
            .stdout(predicate::str::contains("ubuntu_x64_18.04_6.2.3_x64_4.0.30319.42000_core"))
            .stdout(predicate::str::contains("\"module_versions\": 3"));
    }

    #[test]
    fn summary_human_output() {
        pscompat()
            .args(["--format", "human", "summary", &fixture()])
            .assert()
            .success()
            .stdout(predicate::str::contains("modules:    2 (3 versions"));
    }

    #[test]
    fn modules_lists_versions_in_document_order() {
        let json = stdout_json(pscompat().args(["modules", &fixture(), "--name", "az.storage"]));
        assert_eq!(json["modules"][0]["name"], "Az.Storage");
        assert_eq!(json["modules"][0]["versions"], serde_json::json!(["1.2.0", "1.3.0"]));
    }

    #[test]
    fn alias_resolves_to_cmdlet() {
        let json = stdout_json(pscompat().args(["command", &fixture(), "GCI"]));
        let matches = json["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["name"], "Get-ChildItem");
        assert_eq!(matches[0]["module"], "Microsoft.PowerShell.Management");
    }

    #[test]
    fn command_filtered_by_module_version() {
        let json = stdout_json(pscompat().args([
            "command",
            &fixture(),
            "Get-AzStorageBlobInfo",
            "--module",
            "Az.Storage",
            "--module-version",
            "1.3.0",
        ]));
        assert_eq!(json["matches"].as_array().unwrap().len(), 1);
        assert_eq!(json["matches"][0]["kind"], "function");
    }

    #[test]
    fn native_command_listed() {
        let json = stdout_json(pscompat().args(["command", &fixture(), "grep"]));
        assert_eq!(json["native"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn type_accelerator_resolves() {
        pscompat()
            .args(["--format", "human", "types", &fixture(), "[string]"])
            .assert()
            .success()
            .stdout(predicate::str::contains("System.String from System.Private.CoreLib"));
    }

    #[test]
    fn platform_reports_descriptor() {
        let json = stdout_json(pscompat().args(["platform", &fixture()]));
        assert_eq!(json["PowerShell"]["WSManStackVersion"], "3.0");
        assert_eq!(json["Machine"]["ProcessorCount"], 2);
    }
}

mod outcomes {
    use super::*;

    #[test]
    fn missing_command_exits_not_found() {
        pscompat()
            .args(["command", &fixture(), "Invoke-Nothing"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("not_found"));
    }

    #[test]
    fn malformed_profile_exits_12() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{\"Runtime\": {").unwrap();

        pscompat()
            .args(["check", path.to_str().unwrap()])
            .assert()
            .code(12)
            .stdout(predicate::str::contains("\"line\""));
    }

    #[test]
    fn missing_file_exits_21() {
        pscompat()
            .args(["--format", "human", "check", "/nonexistent/dir/absent.json"])
            .assert()
            .code(21)
            .stderr(predicate::str::contains("absent.json"));
    }

    #[test]
    fn bad_version_exits_10() {
        pscompat()
            .args(["command", &fixture(), "gci", "--module-version", "one.two"])
            .assert()
            .code(10);
    }

    #[test]
    fn unknown_subcommand_fails() {
        pscompat()
            .arg("nonexistent-command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }
}

mod store {
    use super::*;

    #[test]
    fn list_and_load_by_id() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::copy(fixture(), tmp.path().join("ubuntu.json")).unwrap();
        let dir = tmp.path().to_str().unwrap().to_string();

        let json = stdout_json(pscompat().args(["--profile-dir", &dir, "list"]));
        assert_eq!(json["resolution"], "cli_flag");
        assert_eq!(json["profiles"][0]["id"], "ubuntu");

        pscompat()
            .env("PSCOMPAT_PROFILE_DIR", &dir)
            .args(["check", "ubuntu"])
            .assert()
            .success();
    }

    #[test]
    fn unknown_id_exits_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        pscompat()
            .args(["--profile-dir", tmp.path().to_str().unwrap(), "check", "windows"])
            .assert()
            .code(1);
    }
}
