//! # Data Models Module / 数据模型模块
//!
//! This module defines the values produced by launch resolution: the mode being
//! launched, where the harness was found, the non-fatal notices raised along the
//! way, and the final [`LaunchPlan`].
//!
//! 此模块定义启动解析产生的值：启动模式、框架所在位置、
//! 过程中产生的非致命提示，以及最终的 [`LaunchPlan`]。

use serde::Serialize;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::core::classpath::Classpath;
use crate::core::error::LaunchError;
use crate::core::java::JavaVersion;

/// Environment flags set for the launched process only.
/// 仅为被启动进程设置的环境标志。
pub const LAUNCH_ENV_FLAGS: [(&str, &str); 2] = [("LOCAL_MODE", "1"), ("START_FEATURE_SERVER", "1")];

/// Which launcher variant is being emulated.
/// 所模拟的启动器变体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchMode {
    /// The interactive harness console.
    /// 交互式测试框架控制台。
    Console,
    /// The higher-level launcher, which puts framework dependency jars first
    /// and falls back to prebuilt jars.
    /// 更上层的启动器，它将框架依赖 jar 放在最前面，并可回退到预构建 jar。
    Atest,
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchMode::Console => f.write_str("console"),
            LaunchMode::Atest => f.write_str("atest"),
        }
    }
}

/// Where the harness jar was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HarnessSource {
    ScriptDir,
    HostOut,
}

/// The directory whose jars make up the harness.
/// 包含框架 jar 的目录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarnessLocation {
    pub dir: PathBuf,
    pub source: HarnessSource,
}

/// A non-fatal condition met during resolution, shown to the user as a warning.
/// 解析过程中遇到的非致命情况，以警告形式显示给用户。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The Java version is unsupported but `IGNORE_JAVA_VERSION_ERROR=y`.
    IgnoredJavaVersion { found: String },
    /// `TRADEFED_OPTS_FILE` names a file that does not exist.
    OptionsFileMissing { path: PathBuf },
    /// `ATEST_HOST_JARS` replaced the computed classpath.
    HostJarsOverride { value: String },
}

/// Everything needed to start the harness; consumed by the launch step.
///
/// 启动测试框架所需的一切；由启动步骤消费。
#[derive(Debug, Clone, Serialize)]
pub struct LaunchPlan {
    pub mode: LaunchMode,
    /// The resolved `java` executable.
    pub java: PathBuf,
    /// `None` when the reported version was not accepted but ignored.
    pub java_version: Option<JavaVersion>,
    /// JVM flags preceding `-cp`, in order.
    pub jvm_flags: Vec<String>,
    pub classpath: Classpath,
    pub harness: HarnessLocation,
    pub entry_class: String,
    /// Forwarded command-line arguments followed by the trailer.
    pub args: Vec<String>,
    /// Extra environment for the launched process.
    pub env: Vec<(String, String)>,
    #[serde(skip)]
    pub notices: Vec<Notice>,
}

impl LaunchPlan {
    /// The argument vector after the program name.
    ///
    /// ```text
    /// <jvm flags> -cp <classpath> -DTF_JAR_DIR=<harness dir> <entry class> <args>
    /// ```
    pub fn jvm_args(&self) -> Result<Vec<OsString>, LaunchError> {
        let mut argv: Vec<OsString> = self.jvm_flags.iter().map(OsString::from).collect();
        argv.push(OsString::from("-cp"));
        argv.push(self.classpath.render()?);

        let mut jar_dir = OsString::from("-DTF_JAR_DIR=");
        jar_dir.push(self.harness.dir.as_os_str());
        argv.push(jar_dir);

        argv.push(OsString::from(&self.entry_class));
        argv.extend(self.args.iter().map(OsString::from));
        Ok(argv)
    }

    /// The complete argument vector, program first.
    pub fn argv(&self) -> Result<Vec<OsString>, LaunchError> {
        let mut argv = vec![self.java.clone().into_os_string()];
        argv.extend(self.jvm_args()?);
        Ok(argv)
    }

    /// Looks up an extra environment value set for the launched process.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
