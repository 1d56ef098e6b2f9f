use std::process::ExitCode;

use anyhow::Context;
use glyphkit::cli::{self, Command, RunOptions};
use glyphkit::{init_logging, sanitize_directory, Config, BUILD_DATE, VERSION};
use tracing::{info, warn};

fn main() -> anyhow::Result<ExitCode> {
    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}\n\n{}", cli::USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    match command {
        Command::Help => {
            println!("{}", cli::USAGE);
            Ok(ExitCode::SUCCESS)
        }
        Command::Version => {
            println!("glyphkit {VERSION} (built {BUILD_DATE})");
            Ok(ExitCode::SUCCESS)
        }
        Command::Run(options) => {
            init_logging()?;
            run(options)
        }
    }
}

fn run(options: RunOptions) -> anyhow::Result<ExitCode> {
    let config = match &options.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)?,
            Err(_) => Config::default(),
        },
    };

    let report = sanitize_directory(&options.input, &options.output, &config)?;
    for failure in &report.failures {
        warn!("{}: {}", failure.path.display(), failure.error);
    }
    info!(
        "{} of {} icons sanitized into {}",
        report.sanitized,
        report.total(),
        options.output.display()
    );

    if report.is_clean() || options.keep_going {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
