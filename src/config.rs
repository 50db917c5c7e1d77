//! Command-line configuration.

use crate::error::{CalculatorError, Result};
use std::path::PathBuf;

/// How the final settlement is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `participant,owed` table followed by a `total` row.
    #[default]
    Csv,

    /// Human-readable summary of items and totals.
    Summary,
}

/// Options for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Edit script to replay.
    pub input: PathBuf,

    pub format: OutputFormat,
}

impl Config {
    /// Builds a config from arguments, excluding the program name.
    ///
    /// The first positional argument is the edit script. `--summary` may
    /// appear anywhere.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input = None;
        let mut format = OutputFormat::Csv;

        for arg in args {
            let arg = arg.into();
            if arg == "--summary" {
                format = OutputFormat::Summary;
            } else if arg.starts_with("--") || input.is_some() {
                return Err(CalculatorError::UnknownOption(arg));
            } else {
                input = Some(PathBuf::from(arg));
            }
        }

        let input = input.ok_or(CalculatorError::MissingArgument)?;
        Ok(Config { input, format })
    }
}
