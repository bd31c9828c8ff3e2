//! # Java Runtime Module / Java 运行时模块
//!
//! Selection of the `java` binary, interpretation of its `-version` output,
//! and the JVM flags whose presence depends on the runtime.
//!
//! 选择 `java` 可执行文件、解析其 `-version` 输出，
//! 以及取决于运行时的 JVM 参数。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::core::env::LaunchEnv;
use crate::core::error::LaunchError;

/// Debug port used when `TF_DEBUG_PORT` is not set.
pub const DEFAULT_DEBUG_PORT: u16 = 10088;

/// Flags opening internal packages to reflection on runtimes newer than 1.8.
pub const MODULE_OPEN_FLAGS: [&str; 2] = [
    "--add-opens=java.base/java.nio=ALL-UNNAMED",
    "--add-opens=java.base/sun.reflect.annotation=ALL-UNNAMED",
];

// `version` then a space or quote, an accepted version, then a boundary.
static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)version[ "]+(1\.8|9|11|17|21)(?:[."_+\-\s]|$)"#)
        .expect("version pattern is valid")
});

/// A Java version the harness is known to run on.
/// 已知可运行测试框架的 Java 版本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JavaVersion {
    #[serde(rename = "1.8")]
    V1_8,
    #[serde(rename = "9")]
    V9,
    #[serde(rename = "11")]
    V11,
    #[serde(rename = "17")]
    V17,
    #[serde(rename = "21")]
    V21,
}

impl JavaVersion {
    pub const ACCEPTED: [JavaVersion; 5] = [
        JavaVersion::V1_8,
        JavaVersion::V9,
        JavaVersion::V11,
        JavaVersion::V17,
        JavaVersion::V21,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JavaVersion::V1_8 => "1.8",
            JavaVersion::V9 => "9",
            JavaVersion::V11 => "11",
            JavaVersion::V17 => "17",
            JavaVersion::V21 => "21",
        }
    }

    fn from_str_exact(s: &str) -> Option<Self> {
        Self::ACCEPTED.into_iter().find(|v| v.as_str() == s)
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The selected `java` binary together with what it reported for `-version`.
/// 选定的 `java` 可执行文件及其 `-version` 输出。
#[derive(Debug, Clone)]
pub struct JavaRuntime {
    pub binary: PathBuf,
    pub version_output: String,
}

/// Picks `TF_JAVA_HOME/bin/java` when set, otherwise `java` from the search path,
/// and checks that it resolves to an executable.
///
/// 若设置了 `TF_JAVA_HOME` 则选择 `TF_JAVA_HOME/bin/java`，否则从搜索路径中查找 `java`，
/// 并检查其能否解析为可执行文件。
pub fn select_java_binary(env: &LaunchEnv) -> Result<PathBuf, LaunchError> {
    let candidate = match env.java_home() {
        Some(home) => home.join("bin").join("java"),
        None => PathBuf::from("java"),
    };

    let resolved = which::which_in(&candidate, env.search_path(), &env.cwd).map_err(|e| {
        tracing::debug!(candidate = %candidate.display(), error = %e, "java lookup failed");
        LaunchError::ToolNotFound {
            tool: candidate.display().to_string(),
        }
    })?;
    tracing::debug!(java = %resolved.display(), "selected java binary");
    Ok(resolved)
}

/// Extracts the accepted version from `java -version` output, if any.
///
/// Returns `None` both for unsupported versions and for unrecognizable output.
pub fn parse_java_version(output: &str) -> Option<JavaVersion> {
    VERSION_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| JavaVersion::from_str_exact(m.as_str()))
}

/// Module-open flags are needed unless the detected version is exactly 1.8.
pub fn needs_module_open_flags(detected: Option<JavaVersion>) -> bool {
    detected != Some(JavaVersion::V1_8)
}

/// Builds the JDWP agent flag listening on `port`, or on `default_port` when unset.
pub fn debug_agent_flag(port: Option<&str>, default_port: u16) -> String {
    let port = port
        .map(str::to_string)
        .unwrap_or_else(|| default_port.to_string());
    format!("-agentlib:jdwp=transport=dt_socket,server=y,suspend=y,address={port}")
}
