//! CLI end-to-end tests that invoke the compiled `syncroot` binary.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn syncroot(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_syncroot"));
    cmd.current_dir(dir).env_remove("SYNCROOT_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_exits_zero() {
    let temp = TempDir::new().unwrap();
    syncroot(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("checksum"))
        .stdout(predicate::str::contains("postrun"));
}

#[test]
fn check_reports_every_error_and_fails() {
    let temp = TempDir::new().unwrap();
    temp.child("cache-file").write_str("x").unwrap();
    temp.child("syncroot.yaml")
        .write_str(&format!(
            "cachedir: {}\nsources:\n  example:\n    basedir: \"\"\n",
            temp.child("cache-file").path().display()
        ))
        .unwrap();

    syncroot(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("is not a directory (cachedir)"))
        .stdout(predicate::str::contains(
            "dir setting 'sources.example.basedir' missing",
        ));
}

#[test]
fn check_succeeds_and_creates_directories() {
    let temp = TempDir::new().unwrap();
    temp.child("settings.toml")
        .write_str(&format!(
            "cachedir = \"{}\"\n\n[sources.example]\nbasedir = \"{}\"\n",
            temp.child("cache").path().display(),
            temp.child("envs").path().display()
        ))
        .unwrap();

    syncroot(temp.path())
        .args(["check", "--config", "settings.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration successfully parsed."));

    temp.child("cache").assert(predicate::path::is_dir());
    temp.child("envs").assert(predicate::path::is_dir());
}

#[test]
fn check_dry_run_creates_nothing() {
    let temp = TempDir::new().unwrap();
    temp.child("syncroot.json")
        .write_str(&format!(
            "{{\"cachedir\": \"{}\"}}",
            temp.child("cache").path().display()
        ))
        .unwrap();

    syncroot(temp.path())
        .args(["--dry-run", "check", "-c", "syncroot.json"])
        .assert()
        .success();

    temp.child("cache").assert(predicate::path::missing());
}

#[test]
fn check_collects_settings_parse_error() {
    let temp = TempDir::new().unwrap();
    temp.child("syncroot.yaml").write_str("timeout: [oops").unwrap();

    syncroot(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed to parse YAML config"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    syncroot(temp.path())
        .args(["exec", "true", "--config", "absent.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn checksum_prints_digest_and_name() {
    let temp = TempDir::new().unwrap();
    temp.child("hello.txt").write_str("hello world").unwrap();

    syncroot(temp.path())
        .args(["checksum", "hello.txt"])
        .assert()
        .success()
        .stdout(
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9  hello.txt\n",
        );
}

#[test]
fn checksum_of_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    syncroot(temp.path())
        .args(["checksum", "missing.bin"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn promote_moves_and_keep_source_copies() {
    let temp = TempDir::new().unwrap();
    temp.child("staged").write_str("payload").unwrap();

    syncroot(temp.path())
        .args(["promote", "staged", "copy", "--keep-source"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copied"));
    temp.child("staged").assert("payload");
    temp.child("copy").assert("payload");

    syncroot(temp.path())
        .args(["promote", "staged", "final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("renamed"));
    temp.child("staged").assert(predicate::path::missing());
    temp.child("final").assert("payload");
}

#[cfg(unix)]
#[test]
fn exec_mirrors_exit_status_and_output() {
    let temp = TempDir::new().unwrap();
    syncroot(temp.path())
        .args(["exec", "sh -c 'echo fetched; exit 3'"])
        .assert()
        .code(3)
        .stdout("fetched\n");
}

#[cfg(unix)]
#[test]
fn exec_timeout_exits_one() {
    let temp = TempDir::new().unwrap();
    syncroot(temp.path())
        .args(["exec", "sleep 5", "--timeout", "1", "--allow-failure"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("timed out"));
}

#[test]
fn status_prints_deploy_result() {
    let temp = TempDir::new().unwrap();
    temp.child(".syncroot-deploy.json")
        .write_str(concat!(
            r#"{"production": "#,
            r#"{"name": "production", "signature": "4f2a9c1", "deploy_success": true}}"#,
        ))
        .unwrap();

    syncroot(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("production"))
        .stdout(predicate::str::contains("4f2a9c1"));

    syncroot(temp.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deploy_success\": true"));
}

#[test]
fn status_without_file_fails() {
    let temp = TempDir::new().unwrap();
    syncroot(temp.path())
        .arg("status")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no deploy result"));
}

#[test]
fn postrun_dry_run_prints_rendered_command() {
    let temp = TempDir::new().unwrap();
    temp.child("syncroot.yaml")
        .write_str(
            "postrun:\n  - notify\n  - --dirs\n  - $modifieddirs\n  - --envs\n  \
             - $modifiedenvs\n  - --branch\n  - $branchparam\n",
        )
        .unwrap();

    syncroot(temp.path())
        .args([
            "--dry-run",
            "postrun",
            "--dir",
            "/b",
            "--dir",
            "/a/",
            "--env",
            "prod",
            "--branch",
            "v3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "notify --dirs /a /b --envs prod --branch v3",
        ));
}

#[cfg(unix)]
#[test]
fn postrun_runs_template_override() {
    let temp = TempDir::new().unwrap();
    syncroot(temp.path())
        .args([
            "postrun",
            "--env",
            "prod",
            "--branch",
            "main",
            "--template",
            "echo $modifiedenvs $branchparam",
        ])
        .assert()
        .success()
        .stdout("prod main\n");
}

#[test]
fn postrun_without_template_is_a_noop() {
    let temp = TempDir::new().unwrap();
    syncroot(temp.path())
        .arg("postrun")
        .assert()
        .success()
        .stdout(predicate::str::contains("No post-run command configured"));
}
