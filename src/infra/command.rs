//! # Command Execution Module / 命令执行模块
//!
//! Process helpers built on `tokio::process`: capturing the combined output of
//! the `java -version` query, and running the harness as the launcher's final,
//! terminal step.
//!
//! 基于 `tokio::process` 的进程辅助功能：捕获 `java -version` 查询的合并输出，
//! 以及作为启动器最后一步运行测试框架。

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use crate::core::error::LaunchError;
use crate::core::java::JavaRuntime;
use crate::core::models::LaunchPlan;

/// Spawns `cmd` with both output streams piped and waits for it.
///
/// Both streams are drained concurrently as raw bytes and decoded lossily;
/// bytes that are not UTF-8 never end the capture early. The returned text
/// holds stdout followed by stderr.
///
/// 以管道方式捕获两个输出流并等待命令结束。
/// 两个流以原始字节并发读取，非 UTF-8 行不会截断捕获内容；
/// 返回文本中先是 stdout，后是 stderr，均以有损方式解码。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<ExitStatus>, String) {
    let mut child = match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return (
            Err(std::io::Error::other("failed to capture child output")),
            String::new(),
        );
    };

    let (stdout, stderr) = tokio::join!(drain(stdout), drain(stderr));
    let status = child.wait().await;

    let mut output = String::from_utf8_lossy(&stdout).into_owned();
    output.push_str(&String::from_utf8_lossy(&stderr));
    (status, output)
}

/// Reads a stream to its end. A read error keeps what arrived before it.
async fn drain<R: AsyncRead + Unpin>(mut stream: R) -> Vec<u8> {
    let mut bytes = Vec::new();
    if let Err(e) = stream.read_to_end(&mut bytes).await {
        tracing::debug!(error = %e, read = bytes.len(), "child output stream ended with an error");
    }
    bytes
}

/// Runs `<java> -version` and pairs the binary with what it printed.
///
/// The JVM prints its version on stderr; both streams are kept. A non-zero
/// exit is not an error here, the output decides.
///
/// 运行 `<java> -version` 并将可执行文件与其输出配对。
pub async fn query_java_runtime(java: &Path) -> Result<JavaRuntime, LaunchError> {
    let mut cmd = tokio::process::Command::new(java);
    cmd.arg("-version").kill_on_drop(true);

    let (status, output) = spawn_and_capture(cmd).await;
    let status = status.map_err(|source| LaunchError::VersionQuery {
        java: java.to_path_buf(),
        source,
    })?;
    tracing::debug!(java = %java.display(), ?status, output = output.trim(), "java -version");

    Ok(JavaRuntime {
        binary: java.to_path_buf(),
        version_output: output,
    })
}

/// Runs the planned command with inherited stdio and waits for it to finish.
///
/// While the child runs, Ctrl-C is absorbed by the launcher so the child alone
/// decides how to react to it.
///
/// # Returns
/// The child's exit code; on Unix a signal-terminated child yields `128 + signal`.
///
/// 以继承的标准输入输出运行计划中的命令并等待其结束。
/// 子进程运行期间，启动器吸收 Ctrl-C，由子进程自行决定如何响应。
pub async fn launch(plan: &LaunchPlan) -> Result<i32, LaunchError> {
    let mut cmd = tokio::process::Command::new(&plan.java);
    cmd.args(plan.jvm_args()?)
        .envs(plan.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = cmd.spawn()?;

    let stop_token = CancellationToken::new();
    let listener_token = stop_token.clone();
    let listener = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = listener_token.cancelled() => break,
                received = tokio::signal::ctrl_c() => {
                    if received.is_err() {
                        break;
                    }
                    tracing::debug!("interrupt forwarded to the harness");
                }
            }
        }
    });

    let status = child.wait().await;
    stop_token.cancel();
    if let Err(e) = listener.await {
        tracing::debug!(error = %e, "signal listener ended abnormally");
    }

    Ok(exit_code_of(status?))
}

/// Maps an exit status onto a shell-style exit code.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
