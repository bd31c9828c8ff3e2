//! # Environment Snapshot Module / 环境快照模块
//!
//! Every environment variable the launcher consumes is read exactly once into a
//! [`LaunchEnv`], which is then passed explicitly to the resolver. Nothing
//! downstream touches `std::env` again.
//!
//! 启动器使用的每个环境变量都只读取一次并存入 [`LaunchEnv`]，
//! 然后显式传递给解析器。下游代码不再访问 `std::env`。

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const TF_JAVA_HOME: &str = "TF_JAVA_HOME";
pub const TF_DEBUG: &str = "TF_DEBUG";
pub const TF_DEBUG_PORT: &str = "TF_DEBUG_PORT";
pub const TRADEFED_OPTS_FILE: &str = "TRADEFED_OPTS_FILE";
pub const TRADEFED_OPTS: &str = "TRADEFED_OPTS";
pub const ANDROID_HOST_OUT: &str = "ANDROID_HOST_OUT";
pub const ANDROID_HOST_OUT_TESTCASES: &str = "ANDROID_HOST_OUT_TESTCASES";
pub const ANDROID_BUILD_TOP: &str = "ANDROID_BUILD_TOP";
pub const ATEST_HOST_JARS: &str = "ATEST_HOST_JARS";
pub const IGNORE_JAVA_VERSION_ERROR: &str = "IGNORE_JAVA_VERSION_ERROR";
pub const HOSTNAME: &str = "HOSTNAME";
pub const ATEST_HELPER: &str = "ATEST_HELPER";
pub const PATH: &str = "PATH";

/// All variables read into a snapshot.
pub const CONSUMED_VARIABLES: &[&str] = &[
    TF_JAVA_HOME,
    TF_DEBUG,
    TF_DEBUG_PORT,
    TRADEFED_OPTS_FILE,
    TRADEFED_OPTS,
    ANDROID_HOST_OUT,
    ANDROID_HOST_OUT_TESTCASES,
    ANDROID_BUILD_TOP,
    ATEST_HOST_JARS,
    IGNORE_JAVA_VERSION_ERROR,
    HOSTNAME,
    ATEST_HELPER,
    PATH,
];

/// A process-local, read-once view of the launch environment.
///
/// Variables are stored only when non-empty, so "set" always means
/// "set to something".
///
/// 启动环境的进程内只读快照。
/// 变量仅在非空时保存，因此"已设置"总是意味着"设置了某个值"。
#[derive(Debug, Clone)]
pub struct LaunchEnv {
    vars: BTreeMap<String, String>,
    /// Directory holding the launcher executable; the first place a harness jar is looked for.
    /// 启动器可执行文件所在目录；查找框架 jar 的第一个位置。
    pub script_dir: PathBuf,
    /// Working directory used for relative search-path entries.
    pub cwd: PathBuf,
    /// Platform family, as in `std::env::consts::OS`.
    pub os: String,
}

impl LaunchEnv {
    /// Captures the current process environment.
    pub fn capture() -> std::io::Result<Self> {
        let exe = env::current_exe()?;
        let script_dir = exe
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let vars = CONSUMED_VARIABLES
            .iter()
            .filter_map(|name| env::var(name).ok().map(|value| (name.to_string(), value)));

        let mut snapshot = Self::from_vars(vars, script_dir);
        snapshot.cwd = env::current_dir()?;
        snapshot.fill_hostname(system_hostname());
        Ok(snapshot)
    }

    /// Builds a snapshot from explicit variables. Empty values are dropped.
    pub fn from_vars<I, K, V>(vars: I, script_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self {
            vars,
            script_dir: script_dir.into(),
            cwd: PathBuf::from("."),
            os: env::consts::OS.to_string(),
        }
    }

    /// Uses `hostname` when `HOSTNAME` is unset. Shells keep `HOSTNAME` as an
    /// unexported variable, so the launcher usually does not inherit it.
    pub fn fill_hostname(&mut self, hostname: Option<String>) {
        if self.hostname().is_some() {
            return;
        }
        if let Some(hostname) = hostname.filter(|h| !h.is_empty()) {
            tracing::debug!(%hostname, "using system hostname");
            self.vars.insert(HOSTNAME.to_string(), hostname);
        }
    }

    /// Returns the value of a consumed variable, if set and non-empty.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    fn path_var(&self, name: &str) -> Option<PathBuf> {
        self.var(name).map(PathBuf::from)
    }

    pub fn java_home(&self) -> Option<PathBuf> {
        self.path_var(TF_JAVA_HOME)
    }

    pub fn debug_enabled(&self) -> bool {
        self.var(TF_DEBUG).is_some()
    }

    pub fn debug_port(&self) -> Option<&str> {
        self.var(TF_DEBUG_PORT)
    }

    pub fn opts_file(&self) -> Option<PathBuf> {
        self.path_var(TRADEFED_OPTS_FILE)
    }

    pub fn tradefed_opts(&self) -> Option<&str> {
        self.var(TRADEFED_OPTS)
    }

    pub fn host_out(&self) -> Option<PathBuf> {
        self.path_var(ANDROID_HOST_OUT)
    }

    pub fn host_out_testcases(&self) -> Option<PathBuf> {
        self.path_var(ANDROID_HOST_OUT_TESTCASES)
    }

    pub fn build_top(&self) -> Option<PathBuf> {
        self.path_var(ANDROID_BUILD_TOP)
    }

    pub fn host_jars(&self) -> Option<&str> {
        self.var(ATEST_HOST_JARS)
    }

    /// Only the exact value `y` suppresses the version error.
    pub fn ignore_java_version_error(&self) -> bool {
        self.var(IGNORE_JAVA_VERSION_ERROR) == Some("y")
    }

    pub fn hostname(&self) -> Option<&str> {
        self.var(HOSTNAME)
    }

    pub fn atest_helper(&self) -> Option<&str> {
        self.var(ATEST_HELPER)
    }

    pub fn search_path(&self) -> Option<OsString> {
        self.var(PATH).map(OsString::from)
    }

    pub fn is_macos(&self) -> bool {
        self.os == "macos"
    }
}

/// The machine's hostname as the kernel reports it.
pub fn system_hostname() -> Option<String> {
    ["/proc/sys/kernel/hostname", "/etc/hostname"]
        .iter()
        .find_map(|path| read_trimmed(Path::new(path)))
}

fn read_trimmed(path: &Path) -> Option<String> {
    let value = fs::read_to_string(path).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
