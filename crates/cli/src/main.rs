//! trieviz command-line entry point.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod cli;
mod commands;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use commands::{execute_command, Session};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.options.verbose);

    let subcommand = cli.command.name();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            let mut command = Cli::command();
            command.build();
            if let Some(sub) = command.find_subcommand_mut(subcommand) {
                eprintln!("{}", sub.render_usage());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let session = Session::open(&cli.options)?;
    let mut out = io::stdout().lock();
    execute_command(cli.command, &session, &mut out)
}

/// Initialize tracing on stderr. `-v` overrides `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}
