//! # Launch Command Module / 启动命令模块
//!
//! Implements the `console` and `atest` commands: snapshot the environment,
//! load the configuration, pick and query `java`, resolve the plan, then
//! either print it (`--dry-run`) or run it and hand back its exit code.
//!
//! 实现 `console` 和 `atest` 命令：快照环境、加载配置、选择并查询 `java`、
//! 解析启动计划，然后打印（`--dry-run`）或运行它并返回其退出码。

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::config::LauncherConfig;
use crate::core::env::LaunchEnv;
use crate::core::error::LaunchError;
use crate::core::java;
use crate::core::models::{LaunchMode, LaunchPlan};
use crate::core::resolver::{self, LaunchRequest};
use crate::infra::{command, t};
use crate::match_locale;
use crate::reporting::{print_launch_error, print_notices, print_plan, print_plan_json};

/// Options collected from the command line.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub mode: LaunchMode,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
    /// Forwarded verbatim to the entry point.
    pub args: Vec<String>,
    /// `--lang` was given, so the configured language must not override it.
    pub lang_given: bool,
}

/// Executes a launch command.
///
/// Launch errors are reported here and turned into their exit codes; only
/// configuration and rendering failures are returned as `Err`.
pub async fn execute(options: LaunchOptions) -> Result<ExitCode> {
    let env = LaunchEnv::capture().with_context(|| t!("error.environment_capture_failed").to_string())?;
    let config = LauncherConfig::load(options.config.as_deref(), &env)?;
    if !options.lang_given && !config.language.is_empty() {
        rust_i18n::set_locale(&match_locale(&config.language));
    }

    let plan = match plan_launch(&options, &env, &config).await {
        Ok(plan) => plan,
        Err(e) => {
            tracing::debug!(error = ?e, "launch resolution failed");
            print_launch_error(&e);
            return Ok(ExitCode::from(e.exit_code()));
        }
    };
    print_notices(&plan.notices);

    if options.dry_run {
        if options.json {
            print_plan_json(&plan)?;
        } else {
            print_plan(&plan)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    tracing::info!(mode = %plan.mode, java = %plan.java.display(), "launching harness");
    match command::launch(&plan).await {
        Ok(code) => {
            tracing::debug!(code, "harness exited");
            Ok(ExitCode::from(shell_exit_code(code)))
        }
        Err(e) => {
            print_launch_error(&e);
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

async fn plan_launch(
    options: &LaunchOptions,
    env: &LaunchEnv,
    config: &LauncherConfig,
) -> Result<LaunchPlan, LaunchError> {
    let binary = java::select_java_binary(env)?;
    let runtime = command::query_java_runtime(&binary).await?;
    resolver::resolve(&LaunchRequest {
        mode: options.mode,
        env,
        config,
        java: &runtime,
        args: &options.args,
    })
}

/// Exit codes wrap modulo 256, as a shell reports them.
fn shell_exit_code(code: i32) -> u8 {
    (code & 0xff) as u8
}
