//! Entry point for the `wordpath` binary.
//!
//! Parses arguments with clap, executes the command, writes its JSON output to
//! stdout and maps failures to a non-zero exit code. Logging is initialised
//! first so every later step can emit structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tracing::{error, field};
use wordpath_cli::{
    cli::{Cli, CliError, render_output, run_cli},
    logging::{self, LoggingError},
};

/// Parse CLI arguments, execute the command, render the output, and flush the
/// output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let output = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_output(&output, &mut writer).context("failed to render output")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err
            .downcast_ref::<CliError>()
            .and_then(|cli_error| match cli_error {
                CliError::Engine(engine) => Some(engine.code().as_str()),
                CliError::Load(load) => Some(load.code().as_str()),
                CliError::Io { .. } => None,
            });

        error!(
            error = %err,
            code = code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
