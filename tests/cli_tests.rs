//! # CLI Integration Tests / CLI 集成测试
//!
//! These tests run the `tf-launcher` binary against a temporary host output
//! tree and a fake `java` script, with a cleared environment.
//!
//! 这些测试使用临时主机输出目录和伪造的 `java` 脚本，在清空的环境中运行 `tf-launcher`。

#![cfg(unix)]

mod common;

use assert_cmd::prelude::*;
use common::{write_fake_java, Workspace, JAVA_11, JAVA_1_7};
use predicates::prelude::*;
use std::process::Command;
use tf_launcher::config::LauncherConfig;

/// A launcher command with only the variables a lunch'ed shell would provide.
fn launcher(ws: &Workspace, version_output: &str) -> Command {
    let java_home = ws.path().join("jdk");
    write_fake_java(&java_home, version_output);

    let mut cmd = Command::cargo_bin("tf-launcher").unwrap();
    cmd.env_clear()
        .env("TF_JAVA_HOME", &java_home)
        .env("ANDROID_HOST_OUT", &ws.host_out)
        .env("NO_COLOR", "1")
        .arg("--lang")
        .arg("en");
    cmd
}

/// The dry run prints the plan and the full command line with the harness
/// glob left for the JVM to expand.
///
/// 试运行打印启动计划和完整命令行，框架通配符留给 JVM 展开。
#[test]
fn test_console_dry_run_prints_command() {
    let ws = Workspace::new();
    let mut cmd = launcher(&ws, JAVA_11);
    cmd.args(["console", "--dry-run"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--- Launch Plan ---"))
        .stdout(predicate::str::contains("LOCAL_MODE=1 START_FEATURE_SERVER=1"))
        .stdout(predicate::str::contains("tradefed/*"))
        .stdout(predicate::str::contains("--add-opens=java.base/java.nio=ALL-UNNAMED"))
        .stdout(predicate::str::contains("com.android.tradefed.command.Console"));
}

#[test]
fn test_dry_run_json_report() {
    let ws = Workspace::new();
    let mut cmd = launcher(&ws, JAVA_11);
    cmd.args(["atest", "--dry-run", "--json", "run", "template"]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "atest");
    assert_eq!(report["java_version"], "11");
    assert_eq!(report["entry_class"], "com.android.tradefed.command.CommandRunner");
    assert_eq!(report["env"]["LOCAL_MODE"], "1");
    assert_eq!(report["args"], serde_json::json!(["run", "template"]));
    let argv = report["argv"].as_array().unwrap();
    assert_eq!(argv.last().unwrap(), "template");
}

/// Arguments after `--` reach the harness even when they spell launcher options.
///
/// `--` 之后的参数即使与启动器选项同名，也会原样转发给测试框架。
#[test]
fn test_args_after_double_dash_are_forwarded() {
    let ws = Workspace::new();
    let mut cmd = launcher(&ws, JAVA_11);
    cmd.args(["console", "--dry-run", "--json", "--", "--dry-run", "-c", "cts.xml", "--json"]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report["args"],
        serde_json::json!(["--dry-run", "-c", "cts.xml", "--json"])
    );
}

/// An unsupported runtime stops the launch with exit status 8.
///
/// 不受支持的运行时以退出码 8 终止启动。
#[test]
fn test_unsupported_java_exits_with_8() {
    let ws = Workspace::new();
    let mut cmd = launcher(&ws, JAVA_1_7);
    cmd.env("PATH", "/opt/nowhere").args(["console", "--dry-run"]);

    cmd.assert()
        .code(8)
        .stderr(predicate::str::contains("Wrong java version"))
        .stderr(predicate::str::contains("1.7.0"))
        .stderr(predicate::str::contains("/opt/nowhere"));
}

#[test]
fn test_ignored_unsupported_java_warns_and_continues() {
    let ws = Workspace::new();
    let mut cmd = launcher(&ws, JAVA_1_7);
    cmd.env("IGNORE_JAVA_VERSION_ERROR", "y").args(["console", "--dry-run"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Warning: Wrong java version"))
        .stdout(predicate::str::contains("--add-opens"));
}

#[test]
fn test_missing_harness_fails() {
    let ws = Workspace::new();
    let mut cmd = launcher(&ws, JAVA_11);
    cmd.env_remove("ANDROID_HOST_OUT").args(["console", "--dry-run"]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to locate tradefed.jar"))
        .stderr(predicate::str::contains("ANDROID_HOST_OUT is not set"));
}

#[test]
fn test_missing_java_fails() {
    let ws = Workspace::new();
    let mut cmd = launcher(&ws, JAVA_11);
    cmd.env("TF_JAVA_HOME", ws.path().join("no-jdk"))
        .args(["console", "--dry-run"]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to find"));
}

/// The harness runs with the launch flags in its environment and the
/// launcher exits with the harness's own status.
///
/// 测试框架在其环境中带有启动标志运行，启动器以测试框架自身的状态退出。
#[test]
fn test_launch_propagates_exit_code_and_environment() {
    let ws = Workspace::new();
    let mut cmd = launcher(&ws, JAVA_11);
    cmd.env("FAKE_JAVA_EXIT", "3")
        .env("TRADEFED_OPTS", "-Dfrom.opts=1")
        .args(["tradefed", "run", "commandAndExit", "--help"]);

    cmd.assert()
        .code(3)
        .stdout(predicate::str::contains("LOCAL_MODE=1 START_FEATURE_SERVER=1"))
        .stdout(predicate::str::contains("arg:-Dfrom.opts=1"))
        .stdout(predicate::str::contains(format!(
            "arg:-DTF_JAR_DIR={}",
            ws.harness_dir().display()
        )))
        .stdout(predicate::str::contains("arg:com.android.tradefed.command.Console\narg:run\narg:commandAndExit\narg:--help"));
}

#[test]
fn test_config_file_changes_debug_port() {
    let ws = Workspace::new();
    let config = ws.path().join("launcher.toml");
    std::fs::write(&config, "debug_port = 5005\n").unwrap();

    let mut cmd = launcher(&ws, JAVA_11);
    cmd.env("TF_DEBUG", "1")
        .args(["console", "--dry-run", "--config"])
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("address=5005"));
}

#[test]
fn test_init_non_interactive_writes_default_config() {
    let ws = Workspace::new();
    let output = ws.path().join("conf").join("launcher.toml");

    let mut cmd = Command::cargo_bin("tf-launcher").unwrap();
    cmd.args(["--lang", "en", "init", "--non-interactive", "--output"])
        .arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote launcher configuration"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(LauncherConfig::from_toml(&written).unwrap(), LauncherConfig::default());

    // A second run leaves the file alone without --force.
    let mut again = Command::cargo_bin("tf-launcher").unwrap();
    again
        .args(["--lang", "en", "init", "--non-interactive", "--output"])
        .arg(&output);
    again
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
