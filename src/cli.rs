//! Command-line argument handling.

use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "\
Usage: glyphkit [OPTIONS] <ICONS_DIR> <OUT_DIR>

Sanitizes every SVG icon in ICONS_DIR into OUT_DIR.

Options:
  --config <FILE>  Load settings from a TOML or JSON file
  --keep-going     Exit successfully even when some icons failed
  --version        Print version and build date
  --help           Print this message";

/// A sanitize run requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub keep_going: bool,
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("{0} needs a value")]
    MissingValue(String),

    #[error("unknown option {0}")]
    UnknownOption(String),

    #[error("missing <{0}>")]
    MissingArgument(&'static str),

    #[error("unexpected argument {0}")]
    UnexpectedArgument(String),
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut config = None;
    let mut keep_going = false;
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--keep-going" => keep_going = true,
            "--config" => {
                let value = args.next().ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                config = Some(PathBuf::from(value));
            }
            _ => {
                if let Some(value) = arg.strip_prefix("--config=") {
                    config = Some(PathBuf::from(value));
                } else if arg.starts_with('-') && arg.len() > 1 {
                    return Err(CliError::UnknownOption(arg));
                } else {
                    positional.push(PathBuf::from(arg));
                }
            }
        }
    }

    let mut positional = positional.into_iter();
    let input = positional.next().ok_or(CliError::MissingArgument("ICONS_DIR"))?;
    let output = positional.next().ok_or(CliError::MissingArgument("OUT_DIR"))?;
    if let Some(extra) = positional.next() {
        return Err(CliError::UnexpectedArgument(extra.display().to_string()));
    }

    Ok(Command::Run(RunOptions {
        config,
        keep_going,
        input,
        output,
    }))
}
