//! # Launch Configuration Resolver / 启动配置解析器
//!
//! Turns an environment snapshot, the launcher configuration and the selected
//! Java runtime into a [`LaunchPlan`]. The steps run strictly in sequence and
//! the first fatal condition aborts resolution; nothing is retried.
//!
//! 将环境快照、启动器配置和选定的 Java 运行时转换为 [`LaunchPlan`]。
//! 各步骤严格按顺序执行，第一个致命情况即终止解析；不进行任何重试。

use std::path::PathBuf;

use crate::core::classpath::{Classpath, ClasspathEntry};
use crate::core::config::LauncherConfig;
use crate::core::discovery;
use crate::core::env::LaunchEnv;
use crate::core::error::LaunchError;
use crate::core::java::{self, JavaRuntime, JavaVersion, MODULE_OPEN_FLAGS};
use crate::core::models::{LaunchMode, LaunchPlan, Notice, LAUNCH_ENV_FLAGS};
use crate::infra::fs as launcher_fs;

/// Inputs to a single resolution.
/// 单次解析的输入。
#[derive(Debug, Clone)]
pub struct LaunchRequest<'a> {
    pub mode: LaunchMode,
    pub env: &'a LaunchEnv,
    pub config: &'a LauncherConfig,
    pub java: &'a JavaRuntime,
    /// Command-line arguments forwarded to the entry point.
    pub args: &'a [String],
}

/// Resolves the full launch plan.
///
/// # Errors
/// * `UnsupportedRuntime` - the version is not accepted and not ignored
/// * `HarnessNotFound` - no harness jar directory was found
/// * `Io` - the macOS temp directory could not be created
///
/// 解析完整的启动计划。
pub fn resolve(request: &LaunchRequest<'_>) -> Result<LaunchPlan, LaunchError> {
    let LaunchRequest {
        mode,
        env,
        config,
        java,
        args,
    } = *request;
    let mut notices = Vec::new();

    let java_version = check_java_version(env, java, &mut notices)?;

    let mut jvm_flags = Vec::new();
    if env.debug_enabled() {
        jvm_flags.push(java::debug_agent_flag(env.debug_port(), config.debug_port));
    }
    jvm_flags.extend(config.jvm_flags.iter().cloned());
    if java::needs_module_open_flags(java_version) {
        jvm_flags.extend(MODULE_OPEN_FLAGS.iter().map(|f| f.to_string()));
    }
    if let Some(opts) = env.tradefed_opts() {
        jvm_flags.extend(split_words(opts));
    }
    if let Some(opts) = host_specific_options(env, &mut notices) {
        jvm_flags.extend(split_words(&opts));
    }
    if let Some(tmp_dir) = platform_temp_dir(env)? {
        jvm_flags.push(format!("-Djava.io.tmpdir={}", tmp_dir.display()));
    }

    let harness = discovery::locate_harness(env)?;
    let mut classpath = Classpath::default();

    if mode == LaunchMode::Atest {
        if let Some(host_out) = env.host_out() {
            classpath.extend_jars(discovery::framework_jars(&host_out, &config.framework_jars));
        }
    }
    classpath.push(ClasspathEntry::Glob(harness.dir.clone()));
    if mode == LaunchMode::Atest {
        classpath.extend_jars(discovery::prebuilt_jars(env, config));
    }
    if let Some(testcases) = env.host_out_testcases() {
        classpath.extend_jars(discovery::supplementary_test_jars(&testcases));
    }

    if let Some(host_jars) = env.host_jars() {
        tracing::info!(classpath = host_jars, "using minimal host jars");
        notices.push(Notice::HostJarsOverride {
            value: host_jars.to_string(),
        });
        classpath = Classpath::Verbatim(host_jars.to_string());
    }

    let mut forwarded = args.to_vec();
    if let Some(helper) = env.atest_helper() {
        forwarded.extend(split_words(helper));
    }

    Ok(LaunchPlan {
        mode,
        java: java.binary.clone(),
        java_version,
        jvm_flags,
        classpath,
        harness,
        entry_class: config.entry_class(mode).to_string(),
        args: forwarded,
        env: LAUNCH_ENV_FLAGS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        notices,
    })
}

/// Accepts a supported version, or records a notice when the error is ignored.
fn check_java_version(
    env: &LaunchEnv,
    java: &JavaRuntime,
    notices: &mut Vec<Notice>,
) -> Result<Option<JavaVersion>, LaunchError> {
    if let Some(version) = java::parse_java_version(&java.version_output) {
        tracing::debug!(%version, "java version accepted");
        return Ok(Some(version));
    }

    let found = java.version_output.trim().to_string();
    if env.ignore_java_version_error() {
        tracing::warn!(found = %found, "unsupported java version ignored");
        notices.push(Notice::IgnoredJavaVersion { found });
        Ok(None)
    } else {
        Err(LaunchError::UnsupportedRuntime {
            found,
            search_path: env.search_path().map(|p| p.to_string_lossy().into_owned()),
        })
    }
}

/// Options for this host from `TRADEFED_OPTS_FILE`, if any.
fn host_specific_options(env: &LaunchEnv, notices: &mut Vec<Notice>) -> Option<String> {
    let path = env.opts_file()?;
    if !path.is_file() {
        notices.push(Notice::OptionsFileMissing { path });
        return None;
    }
    let Some(hostname) = env.hostname() else {
        tracing::warn!(path = %path.display(), "hostname unknown, options file not applied");
        return None;
    };
    match discovery::read_host_options(&path, hostname) {
        Ok(options) => options,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read options file");
            None
        }
    }
}

/// On macOS the JVM gets a temp directory inside the host output tree.
fn platform_temp_dir(env: &LaunchEnv) -> Result<Option<PathBuf>, LaunchError> {
    if !env.is_macos() {
        return Ok(None);
    }
    let Some(host_out) = env.host_out() else {
        return Ok(None);
    };
    let tmp_dir = host_out.join("tmp");
    launcher_fs::ensure_dir(&tmp_dir)?;
    Ok(Some(tmp_dir))
}

/// Splits like an unquoted shell expansion: on whitespace, without quote handling.
fn split_words(value: &str) -> impl Iterator<Item = String> + '_ {
    value.split_whitespace().map(str::to_string)
}
