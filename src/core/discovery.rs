//! # Jar Discovery Module / Jar 发现模块
//!
//! This module locates the jars that make up the harness classpath and reads
//! the per-host JVM options file. Each strategy is a small function so the
//! resolver can compose them in the order each launch mode needs.
//!
//! 此模块定位组成框架 classpath 的 jar，并读取按主机区分的 JVM 选项文件。
//! 每种策略都是一个小函数，解析器可以按各启动模式需要的顺序组合它们。

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::classpath;
use crate::core::config::LauncherConfig;
use crate::core::env::LaunchEnv;
use crate::core::error::LaunchError;
use crate::core::models::{HarnessLocation, HarnessSource};
use crate::infra::fs as launcher_fs;

/// File name of the harness jar.
pub const HARNESS_JAR: &str = "tradefed.jar";

/// Jars containing this entry bundle the Android UI framework and are kept off
/// the classpath.
/// 包含此条目的 jar 打包了 Android UI 框架，不会加入 classpath。
pub const APPLICATION_CLASS_MARKER: &[u8] = b"android/app/Application.class";

/// Finds the harness jar directory.
///
/// Priority: a `tradefed.jar` beside the launcher wins over
/// `ANDROID_HOST_OUT/tradefed/tradefed.jar`.
///
/// 查找框架 jar 所在目录。启动器旁的 `tradefed.jar` 优先于
/// `ANDROID_HOST_OUT/tradefed/tradefed.jar`。
pub fn locate_harness(env: &LaunchEnv) -> Result<HarnessLocation, LaunchError> {
    if env.script_dir.join(HARNESS_JAR).is_file() {
        tracing::debug!(dir = %env.script_dir.display(), "harness found beside launcher");
        return Ok(HarnessLocation {
            dir: env.script_dir.clone(),
            source: HarnessSource::ScriptDir,
        });
    }

    if let Some(host_out) = env.host_out() {
        let dir = host_out.join("tradefed");
        if dir.join(HARNESS_JAR).is_file() {
            tracing::debug!(dir = %dir.display(), "harness found in host output");
            return Ok(HarnessLocation {
                dir,
                source: HarnessSource::HostOut,
            });
        }
    }

    Err(LaunchError::HarnessNotFound {
        script_dir: env.script_dir.clone(),
        host_out: env.host_out(),
    })
}

/// Host-side test jars from every module directory under `testcases`.
///
/// Candidates are entries whose file name contains `.jar`; any whose bytes
/// contain [`APPLICATION_CLASS_MARKER`] are excluded, as are names holding the
/// path separator. A candidate that cannot be read is kept.
///
/// 收集 `testcases` 下每个模块目录中的主机端测试 jar。
/// 候选项为文件名包含 `.jar` 的条目；内容包含 [`APPLICATION_CLASS_MARKER`] 的会被排除。
/// 无法读取的候选项会被保留。
pub fn supplementary_test_jars(testcases: &Path) -> Vec<PathBuf> {
    let modules = match launcher_fs::sorted_subdirs(testcases) {
        Ok(modules) => modules,
        Err(e) => {
            tracing::warn!(dir = %testcases.display(), error = %e, "cannot list testcases directory");
            return Vec::new();
        }
    };

    let mut jars = Vec::new();
    for module in modules {
        let entries = match launcher_fs::sorted_entries(&module) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %module.display(), error = %e, "skipping module directory");
                continue;
            }
        };
        for entry in entries {
            if !is_jar_candidate(&entry) || !joinable(&entry) {
                continue;
            }
            match launcher_fs::file_contains(&entry, APPLICATION_CLASS_MARKER) {
                Ok(true) => {
                    tracing::debug!(jar = %entry.display(), "excluding jar bundling the UI framework");
                }
                Ok(false) => jars.push(entry),
                Err(e) => {
                    tracing::debug!(jar = %entry.display(), error = %e, "unreadable jar kept");
                    jars.push(entry);
                }
            }
        }
    }
    jars
}

fn joinable(jar: &Path) -> bool {
    let ok = classpath::is_joinable(jar);
    if !ok {
        tracing::warn!(jar = %jar.display(), "skipping jar whose name contains the path separator");
    }
    ok
}

fn is_jar_candidate(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(".jar"))
        .unwrap_or(false)
}

/// The configured framework jars present under `ANDROID_HOST_OUT/framework`,
/// in configured priority order.
pub fn framework_jars(host_out: &Path, names: &[String]) -> Vec<PathBuf> {
    let framework = host_out.join("framework");
    names
        .iter()
        .map(|name| framework.join(name))
        .filter(|path| {
            let present = path.is_file();
            tracing::debug!(jar = %path.display(), present, "framework jar probe");
            present
        })
        .collect()
}

/// Prebuilt jars used when the harness source tree is not checked out.
///
/// Returns nothing unless `ANDROID_BUILD_TOP` is set and the configured core
/// source directory is absent. Jars are listed in walk order.
///
/// 当未检出框架源码树时使用的预构建 jar。
/// 仅当设置了 `ANDROID_BUILD_TOP` 且配置的核心源码目录不存在时才返回结果。
pub fn prebuilt_jars(env: &LaunchEnv, config: &LauncherConfig) -> Vec<PathBuf> {
    if env.build_top().is_none() {
        return Vec::new();
    }
    if let Some(core) = config.expanded_core_source_dir(env) {
        if launcher_fs::is_directory(&core) {
            tracing::debug!(dir = %core.display(), "core sources present, no prebuilt fallback");
            return Vec::new();
        }
    }

    config
        .expanded_prebuilt_dirs(env)
        .iter()
        .flat_map(|dir| launcher_fs::find_jars_recursive(dir))
        .filter(|jar| joinable(jar))
        .collect()
}

/// Finds the options for `hostname` in the text of an options file.
///
/// Each line has the form `<hostname>=<options>`; the key is everything before
/// the first `=`. When several lines match, the last one wins.
///
/// 在选项文件文本中查找 `hostname` 对应的选项。
/// 每行格式为 `<hostname>=<options>`；键为第一个 `=` 之前的内容。
/// 多行匹配时以最后一行为准。
pub fn host_options(contents: &str, hostname: &str) -> Option<String> {
    contents
        .lines()
        .filter_map(|line| line.trim_end_matches('\r').split_once('='))
        .filter(|(host, _)| *host == hostname)
        .map(|(_, options)| options.to_string())
        .last()
}

/// Reads per-host options from `path`.
///
/// # Returns
/// `Ok(None)` when no line matches; the I/O error when the file cannot be read.
pub fn read_host_options(path: &Path, hostname: &str) -> std::io::Result<Option<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(host_options(&contents, hostname))
}
