//! # Configuration Module / 配置模块
//!
//! Optional TOML configuration for the launcher. Every field has a default, so
//! an absent file behaves exactly like the stock launcher scripts.
//!
//! 启动器的可选 TOML 配置。每个字段都有默认值，
//! 因此没有配置文件时的行为与原始启动脚本完全一致。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::env::LaunchEnv;
use crate::core::java::DEFAULT_DEBUG_PORT;
use crate::core::models::LaunchMode;
use crate::infra::t;

/// File name looked up next to the launcher executable.
pub const DEFAULT_CONFIG_FILE: &str = "launcher.toml";

pub const CONSOLE_ENTRY: &str = "com.android.tradefed.command.Console";
pub const ATEST_ENTRY: &str = "com.android.tradefed.command.CommandRunner";

/// Launcher configuration, loaded from a TOML file.
/// 从 TOML 文件加载的启动器配置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// The language for the launcher's own messages (e.g., "en", "zh-CN").
    /// An empty value means "detect from the system".
    ///
    /// 启动器自身消息的语言（例如 "en", "zh-CN"）。
    /// 空值表示"从系统检测"。
    pub language: String,
    /// Port for the debug agent when `TF_DEBUG_PORT` is unset.
    /// 未设置 `TF_DEBUG_PORT` 时调试代理使用的端口。
    pub debug_port: u16,
    /// JVM flags always passed before the classpath.
    /// 总是在 classpath 之前传递的 JVM 参数。
    pub jvm_flags: Vec<String>,
    /// Entry class for `console` mode.
    pub console_entry: String,
    /// Entry class for `atest` mode.
    pub atest_entry: String,
    /// Jars probed under `ANDROID_HOST_OUT/framework/`, highest priority first.
    /// 在 `ANDROID_HOST_OUT/framework/` 下探测的 jar，优先级从高到低。
    pub framework_jars: Vec<String>,
    /// Directory trees searched for prebuilt jars when the core source tree is missing.
    /// May reference environment variables, e.g. `${ANDROID_BUILD_TOP}`.
    ///
    /// 当核心源码目录不存在时搜索预构建 jar 的目录树。
    /// 可引用环境变量，例如 `${ANDROID_BUILD_TOP}`。
    pub prebuilt_dirs: Vec<String>,
    /// The source tree whose absence enables the prebuilt fallback.
    pub core_source_dir: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            language: String::new(),
            debug_port: DEFAULT_DEBUG_PORT,
            jvm_flags: vec![
                "-XX:+HeapDumpOnOutOfMemoryError".to_string(),
                "-XX:-OmitStackTraceInFastThrow".to_string(),
            ],
            console_entry: CONSOLE_ENTRY.to_string(),
            atest_entry: ATEST_ENTRY.to_string(),
            framework_jars: [
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
            .iter()
            .map(|s| s.to_string())
            .collect(),
            prebuilt_dirs: vec![
                "${ANDROID_BUILD_TOP}/tools/tradefederation/prebuilts/filegroups/tradefed".to_string(),
                "${ANDROID_BUILD_TOP}/tools/tradefederation/prebuilts/filegroups/suite".to_string(),
            ],
            core_source_dir: "${ANDROID_BUILD_TOP}/tools/tradefederation/core".to_string(),
        }
    }
}

impl LauncherConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| t!("config.parse_failed").to_string())
    }

    /// Loads the configuration from `path`, or from `launcher.toml` beside the
    /// executable, falling back to defaults when neither exists.
    ///
    /// An explicitly given path must exist.
    ///
    /// 从 `path` 或可执行文件旁的 `launcher.toml` 加载配置，
    /// 两者都不存在时使用默认值。显式指定的路径必须存在。
    pub fn load(path: Option<&Path>, env: &LaunchEnv) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let beside = env.script_dir.join(DEFAULT_CONFIG_FILE);
                if !beside.is_file() {
                    tracing::debug!(path = %beside.display(), "no launcher config, using defaults");
                    return Ok(Self::default());
                }
                beside
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| t!("config.read_failed", path = path.display()).to_string())?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded launcher config");
        Ok(config)
    }

    /// Entry class for the given mode.
    pub fn entry_class(&self, mode: LaunchMode) -> &str {
        match mode {
            LaunchMode::Console => &self.console_entry,
            LaunchMode::Atest => &self.atest_entry,
        }
    }

    /// The prebuilt directories with variables expanded; templates that name
    /// an unset variable are dropped.
    pub fn expanded_prebuilt_dirs(&self, env: &LaunchEnv) -> Vec<PathBuf> {
        self.prebuilt_dirs
            .iter()
            .filter_map(|template| expand_path(template, env))
            .collect()
    }

    /// The core source directory with variables expanded.
    pub fn expanded_core_source_dir(&self, env: &LaunchEnv) -> Option<PathBuf> {
        expand_path(&self.core_source_dir, env)
    }
}

/// Expands `$VAR`/`${VAR}` references against the snapshot (not the live process
/// environment). Returns `None` when a referenced variable is unset.
pub fn expand_path(template: &str, env: &LaunchEnv) -> Option<PathBuf> {
    let lookup = |name: &str| -> Result<Option<String>, std::env::VarError> {
        env.var(name)
            .map(|value| Some(value.to_string()))
            .ok_or(std::env::VarError::NotPresent)
    };
    match shellexpand::env_with_context(template, lookup) {
        Ok(expanded) => Some(PathBuf::from(expanded.into_owned())),
        Err(e) => {
            tracing::debug!(template, error = %e, "skipping path template");
            None
        }
    }
}
