//! `shop` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, initialize logging, dispatch one command.
//! - Translate failures into `error[<Kind>]: ...` on stderr and a
//!   kind-specific exit code.

mod cli;
mod commands;
mod render;

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use cli::Cli;
use commands::CliError;
use log::{info, log};
use shop_core::{default_log_level, init_logging, init_stderr_logging, ErrorKind};
use std::process::ExitCode;
use std::time::Instant;

const STDERR_DEFAULT_LEVEL: &str = "warn";

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
            ) =>
        {
            err.exit()
        }
        Err(err) => return report(&CliError::from(err)),
    };

    if let Err(message) = init_cli_logging(&cli) {
        eprintln!("error[{}]: {message}", ErrorKind::InvalidInput);
        return ExitCode::from(commands::exit_code(ErrorKind::InvalidInput));
    }

    let started_at = Instant::now();
    let command = cli.command.name();
    info!("event=command_run module=cli status=start command={command}");

    match commands::run(&cli) {
        Ok(output) => {
            info!(
                "event=command_run module=cli status=ok command={} duration_ms={}",
                command,
                started_at.elapsed().as_millis()
            );
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let kind = err.kind();
            log!(
                kind.log_level(),
                "event=command_run module=cli status=error command={} duration_ms={} error_kind={}",
                command,
                started_at.elapsed().as_millis(),
                kind
            );
            report(&err)
        }
    }
}

fn report(err: &CliError) -> ExitCode {
    let kind = err.kind();
    eprintln!("error[{kind}]: {err}");
    ExitCode::from(commands::exit_code(kind))
}

fn init_cli_logging(cli: &Cli) -> Result<(), String> {
    match cli.log_dir.as_deref() {
        Some(log_dir) => {
            let level = cli.log_level.as_deref().unwrap_or(default_log_level());
            init_logging(level, log_dir)
        }
        None => {
            let level = cli.log_level.as_deref().unwrap_or(STDERR_DEFAULT_LEVEL);
            init_stderr_logging(level)
        }
    }
}
