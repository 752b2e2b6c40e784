use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use hotelprice_cli::cli::{Cli, Commands};
use hotelprice_cli::commands::{InspectOutcome, cmd_init, cmd_inspect, cmd_stats};
use hotelprice_store::StoreConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "hotelprice", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    // Logs go to stderr so the report on stdout stays clean
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = StoreConfig::new(cli.db);

    match run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &StoreConfig) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();

    let code = match command {
        // Initialization failures are printed, never signalled.
        Commands::Init => {
            cmd_init(config, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Commands::Inspect => match cmd_inspect(config, &mut stdout)? {
            InspectOutcome::Complete | InspectOutcome::StoreMissing => ExitCode::SUCCESS,
            InspectOutcome::Failed => ExitCode::FAILURE,
        },
        Commands::Stats { city, format } => {
            cmd_stats(config, city.as_deref(), format, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Commands::Completions { .. } => unreachable!("handled before tracing init"),
    };

    stdout.flush()?;
    Ok(code)
}
