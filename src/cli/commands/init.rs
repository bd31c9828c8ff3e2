//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which writes a `launcher.toml`
//! either from a commented template or through a short interactive wizard.
//!
//! 此模块实现 `init` 命令，通过带注释的模板或简短的交互式向导
//! 写入 `launcher.toml`。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::{fs, path::Path, path::PathBuf};

use crate::core::config::LauncherConfig;
use crate::infra::t;

/// The template written by `init --non-interactive`. Every value equals the built-in default.
pub const DEFAULT_CONFIG: &str = r#"# Trade Federation launcher configuration / Trade Federation 启动器配置

# Language for launcher messages, empty to detect / 启动器消息语言，留空则自动检测
language = ""

# Debug agent port when TF_DEBUG_PORT is unset / 未设置 TF_DEBUG_PORT 时的调试端口
debug_port = 10088

# JVM flags passed before the module-open flags / 在模块开放参数之前传递的 JVM 参数
jvm_flags = ["-XX:+HeapDumpOnOutOfMemoryError", "-XX:-OmitStackTraceInFastThrow"]

# Entry classes / 入口类
console_entry = "com.android.tradefed.command.Console"
atest_entry = "com.android.tradefed.command.CommandRunner"

# atest mode: jars probed under $ANDROID_HOST_OUT/framework, in order
# atest 模式：在 $ANDROID_HOST_OUT/framework 下按顺序探测的 jar
framework_jars = [
    "atest-tradefed.jar",
    "atest_tradefed_launcher.jar",
    "compatibility-tradefed.jar",
    "compatibility-host-util.jar",
    "cts-tradefed.jar",
    "vts-tradefed.jar",
    "csuite-harness.jar",
    "tradefed-isolation.jar",
    "host-libprotobuf-java-full.jar",
    "cts-dalvik-host-test-runner.jar",
    "loganalysis.jar",
    "tradefed.jar",
]

# atest mode: prebuilt jar trees used when core_source_dir is missing
# atest 模式：core_source_dir 不存在时使用的预构建 jar 目录
prebuilt_dirs = [
    "${ANDROID_BUILD_TOP}/tools/tradefederation/prebuilts/filegroups/tradefed",
    "${ANDROID_BUILD_TOP}/tools/tradefederation/prebuilts/filegroups/suite",
]
core_source_dir = "${ANDROID_BUILD_TOP}/tools/tradefederation/core"
"#;

/// Executes the init command.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file without asking
/// * `non_interactive` - Write the template instead of running the wizard
pub fn execute(output: PathBuf, force: bool, non_interactive: bool) -> Result<()> {
    let content = if non_interactive {
        if output.exists() && !force {
            println!("{}", t!("init.file_exists", path = output.display()).red());
            println!("{}", t!("init.use_force").yellow());
            return Ok(());
        }
        DEFAULT_CONFIG.to_string()
    } else {
        match run_wizard(&output, force)? {
            Some(content) => content,
            None => {
                println!("{}", t!("init.aborted").yellow());
                return Ok(());
            }
        }
    };

    write_config(&output, &content)?;

    println!("{}", t!("init.success", path = output.display()).green());
    println!("{}", t!("init.next_steps"));
    Ok(())
}

/// Asks for the handful of settings worth changing and renders them as TOML.
/// Returns `None` when the user declines to overwrite an existing file.
fn run_wizard(output: &Path, force: bool) -> Result<Option<String>> {
    let theme = ColorfulTheme::default();
    println!("\n{}\n", t!("init.wizard_welcome").bold().cyan());

    if output.exists() && !force {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(t!("init.overwrite_prompt", path = output.display()).to_string())
            .default(false)
            .interact()
            .with_context(|| t!("init.prompt_failed").to_string())?;
        if !overwrite {
            return Ok(None);
        }
    }

    let defaults = LauncherConfig::default();
    let language: String = Input::with_theme(&theme)
        .with_prompt(t!("init.language_prompt").to_string())
        .default(rust_i18n::locale().to_string())
        .interact_text()
        .with_context(|| t!("init.prompt_failed").to_string())?;
    let debug_port: u16 = Input::with_theme(&theme)
        .with_prompt(t!("init.debug_port_prompt").to_string())
        .default(defaults.debug_port)
        .interact_text()
        .with_context(|| t!("init.prompt_failed").to_string())?;

    let config = LauncherConfig {
        language,
        debug_port,
        ..defaults
    };
    let content = toml::to_string_pretty(&config)
        .with_context(|| t!("init.serialize_failed").to_string())?;
    Ok(Some(content))
}

fn write_config(output: &Path, content: &str) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init.create_parent_dir_failed", path = parent.display()).to_string()
            })?;
        }
    }
    fs::write(output, content)
        .with_context(|| t!("init.write_failed", path = output.display()).to_string())
}
