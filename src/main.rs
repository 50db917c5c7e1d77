//! Settlement Calculator CLI
//!
//! Replays a CSV script of edits against a fresh calculator and prints the
//! resulting settlement.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- edits.csv > settlement.csv
//! cargo run -- edits.csv --summary
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use settlement_calculator::{Calculator, Config, OutputFormat, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_args(env::args().skip(1))?;

    let file = File::open(&config.input)?;
    let reader = BufReader::new(file);

    let mut calculator = Calculator::new();
    calculator.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    match config.format {
        OutputFormat::Csv => calculator.write_output(handle)?,
        OutputFormat::Summary => calculator.write_summary(handle)?,
    }

    Ok(())
}
