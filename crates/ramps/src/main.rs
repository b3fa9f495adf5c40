#![forbid(unsafe_code)]

//! # Ramps CLI
//!
//! ```bash
//! ramps                      # Race the red and blue balls
//! ramps --series --charts .  # Tables and SVG charts
//! ramps list                 # Show loaded profiles
//! ```

use std::process::ExitCode;

use ramps::{Cli, Command, Config, execute, list, logging};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse_args();
    let config = Config::from_cli(&cli);
    logging::init(config.verbosity);

    if cli.command == Some(Command::List) {
        print!("{}", list(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = execute(&config)?;
    if config.output.is_none() {
        print!("{}", outcome.report);
    }
    for chart in &outcome.charts {
        eprintln!("Wrote {}", chart.display());
    }

    if outcome.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
