use std::env;
use std::process;

use anyhow::Context;

#[macro_use]
mod logging;

mod command;
mod config;
mod error;
mod history;
mod parser;
mod pipes;
mod prompt;
mod shell;
mod signal_handler;

use config::Config;

fn print_help() {
    println!("ccsh - a small pipeline shell");
    println!();
    println!("Usage: ccsh [OPTIONS]");
    println!("  -h, --help       Print this help");
    println!("  -v, --version    Print version");
    println!("      --no-history Keep history in memory only");
    println!("      --debug      Print debug diagnostics to stderr");
    println!();
    println!("Environment:");
    println!("  CCSH_HISTORY     History file (default: ./history.txt)");
    println!("  CCSH_DEBUG       Set to 1 to enable debug diagnostics");
}

fn print_version() {
    println!("ccsh v {}", env!("CARGO_PKG_VERSION"));
}

/// What the command line asks for before the session starts.
#[derive(Debug, PartialEq)]
enum Startup {
    Help,
    Version,
    Run,
}

/// Apply recognized flags to `config`. Anything else is warned about and ignored.
fn apply_args(args: &[String], config: &mut Config) -> Startup {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Startup::Help;
    }

    if args.iter().any(|a| a == "-v" || a == "--version" || a == "-V") {
        return Startup::Version;
    }

    for arg in args {
        match arg.as_str() {
            "--no-history" => config.persist_history = false,
            "--debug" => config.debug = true,
            other => report!("ccsh: ignoring unknown argument '{}'", other),
        }
    }
    Startup::Run
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut config = Config::from_env();
    match apply_args(&args, &mut config) {
        Startup::Help => {
            print_help();
            process::exit(0);
        }
        Startup::Version => {
            print_version();
            process::exit(0);
        }
        Startup::Run => {}
    }

    logging::set_debug(config.debug);
    debug_log!("{:?}", config);

    signal_handler::ignore_interrupts().context("failed to install SIGINT handler")?;

    let history_path = config.history_path.clone();
    let mut shell = shell::Shell::new(config)
        .with_context(|| format!("cannot load history from {}", history_path.display()))?;

    shell.run().context("failed to read input")?;
    Ok(())
}
