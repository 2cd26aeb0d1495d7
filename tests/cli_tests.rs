//! CLI integration tests.
//!
//! Drive the real binary with fake orchestration commands so no
//! container runtime is needed.

use assert_cmd::Command;
use predicates::prelude::*;

fn stackpilot() -> Command {
    Command::cargo_bin("stackpilot").expect("binary builds")
}

#[test]
fn help_lists_lifecycle_modes() {
    stackpilot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackpilot"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("stop"))
        .stdout(predicate::str::contains("restart"));
}

#[test]
fn version_prints_name() {
    stackpilot()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackpilot"));
}

#[test]
fn unrecognized_mode_exits_one() {
    stackpilot()
        .arg("reboot")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn empty_mode_exits_one() {
    stackpilot().arg("").assert().failure().code(1);
}

#[test]
fn missing_mode_exits_one() {
    stackpilot()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_config_exits_one() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("stackpilot.toml");
    std::fs::write(&config, "host = [not toml").expect("write config");

    stackpilot()
        .current_dir(dir.path())
        .arg("stop")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}

#[cfg(unix)]
#[test]
fn stop_succeeds_with_fake_compose() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("stackpilot.toml");
    std::fs::write(
        &config,
        r#"
[compose]
bin = "true"
"#,
    )
    .expect("write config");

    stackpilot()
        .current_dir(dir.path())
        .arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stack stopped"));
}

#[cfg(unix)]
#[test]
fn stop_surfaces_orchestration_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = dir.path().join("stackpilot.toml");
    std::fs::write(
        &config,
        r#"
[compose]
bin = "false"
"#,
    )
    .expect("write config");

    stackpilot()
        .current_dir(dir.path())
        .arg("stop")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exited with"));
}

#[cfg(unix)]
#[test]
fn start_with_deadline_times_out_and_redirects_compose_output() {
    let dir = tempfile::tempdir().expect("temp dir");

    // Grab a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let config = dir.path().join("stackpilot.toml");
    std::fs::write(
        &config,
        format!(
            r#"
host = "127.0.0.1"

[compose]
bin = "true"
log_file = "compose-up.log"

[[service]]
name = "influxdb"
port = {port}
health_path = "/ping"

[readiness]
poll_interval_secs = 1
timeout_secs = 1
"#
        ),
    )
    .expect("write config");

    stackpilot()
        .current_dir(dir.path())
        .arg("start")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not ready"));

    assert!(
        dir.path().join("compose-up.log").exists(),
        "bring-up output must be redirected to the log file"
    );
}
