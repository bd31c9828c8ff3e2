// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

use tf_launcher::core::env::LaunchEnv;
use tf_launcher::core::java::JavaRuntime;

pub const JAVA_11: &str = "openjdk version \"11.0.20\" 2023-07-18\nOpenJDK Runtime Environment (build 11.0.20+8)\n";
pub const JAVA_1_8: &str = "java version \"1.8.0_292\"\nJava(TM) SE Runtime Environment (build 1.8.0_292-b10)\n";
pub const JAVA_1_7: &str = "java version \"1.7.0\"\nJava(TM) SE Runtime Environment (build 1.7.0-b147)\n";

/// A temporary tree with an empty launcher directory and a host output
/// directory holding `tradefed/tradefed.jar`.
pub struct Workspace {
    pub root: TempDir,
    pub script_dir: PathBuf,
    pub host_out: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempdir().expect("Failed to create temporary directory");
        let script_dir = root.path().join("bin");
        let host_out = root.path().join("out").join("host");
        fs::create_dir_all(&script_dir).expect("Failed to create launcher directory");
        touch(&host_out.join("tradefed").join("tradefed.jar"));
        Workspace {
            root,
            script_dir,
            host_out,
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn harness_dir(&self) -> PathBuf {
        self.host_out.join("tradefed")
    }

    /// A linux snapshot with `ANDROID_HOST_OUT` set plus `vars`.
    pub fn env(&self, vars: &[(&str, &str)]) -> LaunchEnv {
        let host_out = self.host_out.display().to_string();
        let mut all: Vec<(String, String)> = vec![("ANDROID_HOST_OUT".to_string(), host_out)];
        all.extend(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        linux_env(all, &self.script_dir)
    }
}

/// Builds a snapshot that behaves like linux regardless of the host running the tests.
pub fn linux_env<I, K, V>(vars: I, script_dir: &Path) -> LaunchEnv
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut env = LaunchEnv::from_vars(vars, script_dir);
    env.os = "linux".to_string();
    env
}

pub fn runtime(version_output: &str) -> JavaRuntime {
    JavaRuntime {
        binary: PathBuf::from("/usr/lib/jvm/bin/java"),
        version_output: version_output.to_string(),
    }
}

/// Creates an empty file, including its parent directories.
pub fn touch(path: &Path) {
    write_file(path, b"");
}

pub fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Writes `<java_home>/bin/java`, a shell script that prints `version_output`
/// on stderr for `-version`, and otherwise echoes its launch environment and
/// arguments before exiting with `$FAKE_JAVA_EXIT` (default 0).
///
/// The script uses shell builtins only, so it works with an empty `PATH`.
/// `version_output` must not contain a single quote.
#[cfg(unix)]
pub fn write_fake_java(java_home: &Path, version_output: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let java = java_home.join("bin").join("java");
    let script = format!(
        r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  printf '%s' '{version}' >&2
  exit 0
fi
echo "LOCAL_MODE=$LOCAL_MODE START_FEATURE_SERVER=$START_FEATURE_SERVER"
for arg in "$@"; do
  echo "arg:$arg"
done
exit "${{FAKE_JAVA_EXIT:-0}}"
"#,
        version = version_output
    );
    write_file(&java, script.as_bytes());
    fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).expect("Failed to make java executable");
    java
}
