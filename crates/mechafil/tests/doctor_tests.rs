//! Integration tests for doctor command

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use mechafil_testkit::{PromptFixture, get_shared_mock_server, temp_dir_in_workspace};
use serde_json::Value;
use std::path::Path;
use std::process::Command;

fn mechafil(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("mechafil"));
    cmd.current_dir(dir)
        .env_remove("MECHAFIL_CONFIG")
        .env_remove("MECHAFIL_SERVER_URL")
        .env_remove("MECHAFIL_PROMPT_TEMPLATE")
        .env_remove("MECHAFIL_LOG");
    cmd
}

/// Run `doctor --json`, which must exit 0, and parse its output
fn doctor_json(cmd: &mut Command) -> Value {
    let output = cmd.args(["doctor", "--json"]).output().unwrap();
    output.clone().assert().success();
    serde_json::from_slice(&output.stdout).expect("doctor --json prints JSON")
}

fn check<'a>(report: &'a Value, id: &str) -> &'a Value {
    report["checks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == id)
        .unwrap_or_else(|| panic!("missing check {}", id))
}

#[test]
fn test_doctor_all_checks_pass() {
    let (mock, base_url) = {
        let mut server = get_shared_mock_server();
        let mock = server
            .mock("GET", "/doctor-ok/health")
            .with_status(200)
            .create();
        (mock, format!("{}/doctor-ok", server.url()))
    };
    let fixture = PromptFixture::new("Hi {{include:a.md}}", &[("a.md", "there")]);

    let report = doctor_json(
        mechafil(fixture.root())
            .args(["--server-url", &base_url])
            .arg("--template")
            .arg(fixture.template_path()),
    );

    mock.assert();
    assert_eq!(report["schema_version"], "1.0");
    assert_eq!(report["config"]["server_url"], base_url.as_str());
    assert_eq!(check(&report, "config_valid")["status"], "ok");
    assert_eq!(check(&report, "template_renders")["status"], "ok");
    assert_eq!(check(&report, "template_renders")["details"]["includes"], 1);
    assert_eq!(check(&report, "upstream_reachable")["status"], "ok");
}

#[test]
fn test_doctor_warns_when_upstream_is_down() {
    let temp = temp_dir_in_workspace();

    let report = doctor_json(mechafil(temp.path()).args(["--server-url", "http://127.0.0.1:1"]));

    let upstream = check(&report, "upstream_reachable");
    assert_eq!(upstream["status"], "warning");
    assert_eq!(upstream["details"]["url"], "http://127.0.0.1:1/health");
}

#[test]
fn test_doctor_reports_broken_template() {
    let fixture = PromptFixture::new("{{include:gone.txt}}", &[]);

    let report = doctor_json(
        mechafil(fixture.root())
            .args(["--server-url", "http://127.0.0.1:1"])
            .arg("--template")
            .arg(fixture.template_path()),
    );

    let template = check(&report, "template_renders");
    assert_eq!(template["status"], "error");
    assert_eq!(template["details"]["code"], "INCLUDE_NOT_FOUND");
    assert!(!fixture.prompts_dir().join("gone.txt").exists());
}

#[test]
fn test_doctor_reports_invalid_config_and_still_exits_zero() {
    let temp = temp_dir_in_workspace();
    std::fs::write(
        temp.path().join("mechafil.toml"),
        "[upstream]\nurl = \"not a url\"\n",
    )
    .unwrap();

    let report = doctor_json(&mut mechafil(temp.path()));

    assert_eq!(check(&report, "config_valid")["status"], "error");
    assert_eq!(report["checks"].as_array().unwrap().len(), 1);
}

#[test]
fn test_doctor_human_readable_output() {
    let temp = temp_dir_in_workspace();

    let output = mechafil(temp.path())
        .args(["--server-url", "http://127.0.0.1:1", "doctor"])
        .output()
        .unwrap();

    output.clone().assert().success();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Environment Health Check"));
    assert!(stdout.contains("mechafil-server"));
}
