//! # Command-Line Interface / 命令行接口
//!
//! Builds the `clap` command tree with localized help text and dispatches to
//! the handlers in [`crate::commands`].
//!
//! 使用本地化的帮助文本构建 `clap` 命令树，并分派到 [`crate::commands`] 中的处理程序。

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::commands::{self, run::RunArgs};
use crate::core::presets::WorkloadIntensity;
use crate::infra::t;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang=").map(str::to_string))
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .help(t!("arg_config").to_string())
        .value_name("CONFIG")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

fn workdir_arg() -> Arg {
    Arg::new("workdir")
        .short('w')
        .long("workdir")
        .help(t!("arg_workdir").to_string())
        .value_name("DIR")
        .value_parser(clap::value_parser!(PathBuf))
        .action(ArgAction::Set)
}

/// Builds the full command tree. Help strings use the current locale.
pub fn build_cli() -> Command {
    Command::new("unixbench-runner")
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
            Command::new("run")
                .about(t!("cmd_run_about").to_string())
                .arg(config_arg())
                .arg(
                    Arg::new("preset")
                        .long("preset")
                        .help(t!("arg_preset").to_string())
                        .value_name("LEVEL")
                        .value_parser(clap::value_parser!(WorkloadIntensity))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("threads")
                        .short('c')
                        .long("threads")
                        .help(t!("arg_threads").to_string())
                        .value_name("THREADS")
                        .value_parser(clap::value_parser!(NonZeroU32))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("iterations")
                        .short('i')
                        .long("iterations")
                        .help(t!("arg_iterations").to_string())
                        .value_name("ITERATIONS")
                        .value_parser(clap::value_parser!(NonZeroU32))
                        .action(ArgAction::Set),
                )
                .arg(workdir_arg())
                .arg(
                    Arg::new("test")
                        .short('t')
                        .long("test")
                        .help(t!("arg_test").to_string())
                        .value_name("TEST")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .help(t!("arg_verbose").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .help(t!("arg_timeout").to_string())
                        .value_name("SECS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("grace")
                        .long("grace")
                        .help(t!("arg_grace").to_string())
                        .value_name("SECS")
                        .default_value("5")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help(t!("arg_json").to_string())
                        .value_name("FILE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("skip-check")
                        .long("skip-check")
                        .help(t!("arg_skip_check").to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("extra")
                        .help(t!("arg_extra").to_string())
                        .value_name("EXTRA")
                        .num_args(0..)
                        .allow_hyphen_values(true)
                        .last(true)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("check")
                .about(t!("cmd_check_about").to_string())
                .arg(config_arg())
                .arg(workdir_arg()),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about").to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("arg_output").to_string())
                        .value_name("FILE")
                        .default_value(commands::init::DEFAULT_CONFIG_FILE)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive").to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("presets").about(t!("cmd_presets_about").to_string()))
}

fn run_args(matches: &ArgMatches) -> RunArgs {
    RunArgs {
        config: matches.get_one::<PathBuf>("config").cloned(),
        preset: matches.get_one::<WorkloadIntensity>("preset").copied(),
        threads: matches.get_one::<NonZeroU32>("threads").copied(),
        iterations: matches.get_one::<NonZeroU32>("iterations").copied(),
        workdir: matches.get_one::<PathBuf>("workdir").cloned(),
        tests: matches
            .get_many::<String>("test")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        verbose: matches.get_flag("verbose"),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        grace_secs: matches.get_one::<u64>("grace").copied().unwrap_or(5),
        json: matches.get_one::<PathBuf>("json").cloned(),
        skip_check: matches.get_flag("skip-check"),
        extra_args: matches
            .get_many::<String>("extra")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
    }
}

/// Parses the process arguments and runs the selected subcommand.
///
/// # Returns
/// The exit code the process should terminate with
pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    let language = crate::init(pre_parse_language().as_deref());

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => commands::run::execute(run_args(run_matches)).await,
        Some(("check", check_matches)) => commands::check::execute(
            check_matches.get_one::<PathBuf>("config").cloned(),
            check_matches.get_one::<PathBuf>("workdir").cloned(),
        ),
        Some(("init", init_matches)) => {
            let output = init_matches
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(commands::init::DEFAULT_CONFIG_FILE));
            commands::init::run_init_wizard(
                &output,
                &language,
                init_matches.get_flag("non-interactive"),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("presets", _)) => {
            commands::presets::execute();
            Ok(ExitCode::SUCCESS)
        }
        // `subcommand_required` makes clap exit before reaching this.
        _ => Ok(ExitCode::FAILURE),
    }
}
