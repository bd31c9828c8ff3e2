//! # Launch Error Module / 启动错误模块
//!
//! The fatal failures of launch resolution. Tolerated conditions (an options
//! file that is referenced but absent, an ignored version mismatch) are
//! reported as [`Notice`](crate::core::models::Notice)s instead.
//!
//! 启动解析过程中的致命错误。可容忍的情况（引用但不存在的选项文件、
//! 被忽略的版本不匹配）以 [`Notice`](crate::core::models::Notice) 形式报告。

use std::path::PathBuf;
use thiserror::Error;

/// Exit status used when the Java runtime version is not supported.
/// Java 运行时版本不受支持时使用的退出码。
pub const UNSUPPORTED_RUNTIME_EXIT_CODE: u8 = 8;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// A required executable could not be resolved.
    #[error("unable to find {tool}")]
    ToolNotFound { tool: String },

    /// The Java runtime reported a version outside the accepted set.
    #[error("wrong java version: 1.8, 9, 11, 17 or 21 is required, found: {found}")]
    UnsupportedRuntime {
        found: String,
        search_path: Option<String>,
    },

    /// No harness jar was located by any discovery strategy.
    #[error("unable to locate tradefed.jar in {} or under ANDROID_HOST_OUT", script_dir.display())]
    HarnessNotFound {
        script_dir: PathBuf,
        host_out: Option<PathBuf>,
    },

    /// Running `java -version` itself failed.
    #[error("failed to query the version of {}", java.display())]
    VersionQuery {
        java: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A classpath entry contains the platform path separator.
    #[error("classpath entry cannot be joined: {entry}")]
    InvalidClasspath { entry: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LaunchError {
    /// The process exit status the launcher terminates with for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            LaunchError::UnsupportedRuntime { .. } => UNSUPPORTED_RUNTIME_EXIT_CODE,
            _ => 1,
        }
    }
}
