// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf, process::ExitCode};

use crate::core::models::LaunchMode;
use crate::infra::t;
use crate::match_locale;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    // Only launcher options come before the subcommand's forwarded arguments.
    for (pos, arg) in args.iter().enumerate().skip(1) {
        if arg == "--lang" {
            return args.get(pos + 1).cloned();
        }
        if let Some(lang) = arg.strip_prefix("--lang=") {
            return Some(lang.to_string());
        }
        if !arg.starts_with('-') {
            break;
        }
    }
    None
}

fn launch_command(name: &'static str, about: String) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg.config").to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help(t!("arg.dry_run").to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help(t!("arg.json").to_string())
                .requires("dry-run")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("args")
                .help(t!("arg.args").to_string())
                .value_name("ARGS")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
}

pub fn build_cli() -> Command {
    Command::new("tf-launcher")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about").to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang").to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            launch_command("console", t!("cmd.console_about").to_string()).visible_alias("tradefed"),
        )
        .subcommand(launch_command("atest", t!("cmd.atest_about").to_string()))
        .subcommand(
            Command::new("init")
                .about(t!("cmd.init_about").to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg.output").to_string())
                        .value_name("OUTPUT")
                        .default_value(crate::core::config::DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("arg.force").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg.non_interactive").to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn launch_options(mode: LaunchMode, matches: &ArgMatches, lang_given: bool) -> commands::launch::LaunchOptions {
    commands::launch::LaunchOptions {
        mode,
        config: matches.get_one::<PathBuf>("config").cloned(),
        dry_run: matches.get_flag("dry-run"),
        json: matches.get_flag("json"),
        args: matches
            .get_many::<String>("args")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        lang_given,
    }
}

pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    let explicit_language = pre_parse_language();
    match &explicit_language {
        Some(language) => rust_i18n::set_locale(&match_locale(language)),
        None => crate::init(),
    }
    let lang_given = explicit_language.is_some();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("console", sub)) => {
            commands::launch::execute(launch_options(LaunchMode::Console, sub, lang_given)).await
        }
        Some(("atest", sub)) => {
            commands::launch::execute(launch_options(LaunchMode::Atest, sub, lang_given)).await
        }
        Some(("init", sub)) => {
            let output = sub
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(crate::core::config::DEFAULT_CONFIG_FILE));
            commands::init::execute(
                output,
                sub.get_flag("force"),
                sub.get_flag("non-interactive"),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        // `subcommand_required` makes clap print help and exit before we get here.
        _ => Ok(ExitCode::FAILURE),
    }
}
