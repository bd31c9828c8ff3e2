//! # Classpath Module / Classpath 模块
//!
//! The classpath is kept as an ordered list of typed entries for as long as
//! possible and only joined into a separator-delimited string at the exec
//! boundary. Order matters: the JVM loads a class from the first entry that
//! provides it.
//!
//! classpath 尽可能长时间地保持为有类型条目的有序列表，
//! 仅在执行边界处才用分隔符连接为字符串。顺序很重要：
//! JVM 从第一个提供某个类的条目中加载该类。

use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::core::error::LaunchError;

/// A single classpath element.
/// 单个 classpath 元素。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ClasspathEntry {
    /// A concrete archive path.
    /// 具体的归档文件路径。
    Jar(PathBuf),
    /// Every jar in a directory, written as `<dir>/*` and expanded by the JVM itself.
    /// 目录中的所有 jar，写作 `<dir>/*`，由 JVM 自行展开。
    Glob(PathBuf),
}

impl ClasspathEntry {
    /// The path as it appears in the joined classpath.
    pub fn render(&self) -> PathBuf {
        match self {
            ClasspathEntry::Jar(path) => path.clone(),
            ClasspathEntry::Glob(dir) => dir.join("*"),
        }
    }
}

/// Whether `path` can stand as one classpath element, i.e. it does not contain
/// the platform path separator.
pub fn is_joinable(path: &Path) -> bool {
    std::env::join_paths([path]).is_ok()
}

/// The final classpath: either discovered entries or a verbatim override.
/// 最终的 classpath：要么是发现的条目，要么是原样覆盖的值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classpath {
    Entries(Vec<ClasspathEntry>),
    /// Taken as-is from `ATEST_HOST_JARS`; already separator-delimited.
    Verbatim(String),
}

impl Default for Classpath {
    fn default() -> Self {
        Classpath::Entries(Vec::new())
    }
}

impl Classpath {
    pub fn push(&mut self, entry: ClasspathEntry) {
        match self {
            Classpath::Entries(entries) => entries.push(entry),
            Classpath::Verbatim(_) => {
                tracing::debug!(?entry, "ignoring entry appended to an overridden classpath")
            }
        }
    }

    pub fn push_jar(&mut self, path: impl AsRef<Path>) {
        self.push(ClasspathEntry::Jar(path.as_ref().to_path_buf()));
    }

    pub fn extend_jars<I, P>(&mut self, jars: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for jar in jars {
            self.push_jar(jar);
        }
    }

    pub fn entries(&self) -> &[ClasspathEntry] {
        match self {
            Classpath::Entries(entries) => entries,
            Classpath::Verbatim(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Classpath::Entries(entries) => entries.is_empty(),
            Classpath::Verbatim(value) => value.is_empty(),
        }
    }

    /// Joins the classpath with the platform path separator.
    ///
    /// # Errors
    /// `LaunchError::InvalidClasspath` if an entry itself contains the separator.
    pub fn render(&self) -> Result<OsString, LaunchError> {
        match self {
            Classpath::Verbatim(value) => Ok(OsString::from(value)),
            Classpath::Entries(entries) => {
                let rendered: Vec<PathBuf> = entries.iter().map(ClasspathEntry::render).collect();
                std::env::join_paths(&rendered).map_err(|_| {
                    let entry = rendered
                        .iter()
                        .find(|p| !is_joinable(p))
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    LaunchError::InvalidClasspath { entry }
                })
            }
        }
    }
}
