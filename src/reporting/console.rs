//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints notices, fatal launch errors and dry-run plans to the
//! console, colored and localized.
//!
//! 此模块将提示、致命启动错误和试运行计划打印到控制台，带颜色且已本地化。

use colored::*;
use std::ffi::OsString;

use crate::core::classpath::{Classpath, ClasspathEntry};
use crate::core::error::LaunchError;
use crate::core::models::{LaunchPlan, Notice};
use crate::infra::t;

/// Prints every notice as a warning on stderr.
///
/// # Output Format / 输出格式
/// ```text
/// Warning: Wrong java version. 1.8, 9, 11, 17 or 21 is required. Found: java version "1.7.0"
/// Warning: Options file /path/opts.txt not found, continuing without host options.
/// Using minimal host jars: /a.jar:/b.jar
/// ```
pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        let line = match notice {
            Notice::IgnoredJavaVersion { found } => {
                t!("notice.ignored_java_version", found = found).yellow()
            }
            Notice::OptionsFileMissing { path } => {
                t!("notice.options_file_missing", path = path.display()).yellow()
            }
            Notice::HostJarsOverride { value } => {
                t!("notice.host_jars_override", value = value).cyan()
            }
        };
        eprintln!("{}", line);
    }
}

/// Prints a fatal launch error on stderr, including any hints that help the
/// user fix it.
///
/// 在 stderr 上打印致命启动错误，以及帮助用户修复的提示。
pub fn print_launch_error(error: &LaunchError) {
    match error {
        LaunchError::ToolNotFound { tool } => {
            eprintln!("{}", t!("error.tool_not_found", tool = tool).red());
        }
        LaunchError::UnsupportedRuntime { found, search_path } => {
            eprintln!("{}", t!("error.unsupported_runtime", found = found).red());
            if let Some(search_path) = search_path {
                eprintln!("{}", t!("error.path_value"));
                eprintln!("{}", search_path);
            }
        }
        LaunchError::HarnessNotFound { script_dir, host_out } => {
            eprintln!(
                "{}",
                t!("error.harness_not_found", dir = script_dir.display()).red()
            );
            if host_out.is_none() {
                eprintln!("{}", t!("error.host_out_unset").yellow());
            }
        }
        other => {
            eprintln!("{}", t!("error.launch_failed", error = other).red());
        }
    }
}

/// Prints a human-readable summary of the plan and the exact command line.
///
/// # Output Format / 输出格式
/// ```text
/// --- Launch Plan ---
///   Mode        : console
///   Java        : /usr/bin/java (11)
///   Harness     : /out/host/tradefed
///   Classpath   :
///     - /out/host/tradefed/*
///   Entry       : com.android.tradefed.command.Console
///
/// LOCAL_MODE=1 START_FEATURE_SERVER=1 /usr/bin/java ... -cp '/out/host/tradefed/*' ...
/// ```
pub fn print_plan(plan: &LaunchPlan) -> Result<(), LaunchError> {
    println!("{}", t!("plan.banner").bold());
    println!("  {:<12}: {}", t!("plan.mode"), plan.mode);

    let version = plan
        .java_version
        .map(|v| v.to_string())
        .unwrap_or_else(|| t!("plan.version_unknown").to_string());
    println!(
        "  {:<12}: {} ({})",
        t!("plan.java"),
        plan.java.display(),
        version
    );
    println!("  {:<12}: {}", t!("plan.harness"), plan.harness.dir.display());

    println!("  {:<12}:", t!("plan.classpath"));
    match &plan.classpath {
        Classpath::Verbatim(value) => println!("    - {}", value.cyan()),
        Classpath::Entries(entries) => {
            for entry in entries {
                let rendered = entry.render().display().to_string();
                match entry {
                    ClasspathEntry::Glob(_) => println!("    - {}", rendered.green()),
                    ClasspathEntry::Jar(_) => println!("    - {}", rendered),
                }
            }
        }
    }
    println!("  {:<12}: {}", t!("plan.entry"), plan.entry_class);

    println!();
    println!("{}", render_command_line(plan)?);
    Ok(())
}

/// Renders the launch as a single shell-quoted line, environment flags first.
pub fn render_command_line(plan: &LaunchPlan) -> Result<String, LaunchError> {
    let argv = plan.argv()?;
    let words: Vec<String> = plan
        .env
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .chain(argv.iter().map(|arg| quote(arg)))
        .collect();
    Ok(words.join(" "))
}

fn quote(arg: &OsString) -> String {
    let arg = arg.to_string_lossy();
    shlex::try_quote(&arg)
        .map(|quoted| quoted.into_owned())
        .unwrap_or_else(|_| arg.into_owned())
}
