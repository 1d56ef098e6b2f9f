//! Directory-to-directory sanitizing, parallel across icons.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use glyphkit_settings::Config;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{SanitizeError, SanitizeResult};
use crate::sanitize::Sanitizer;

/// An icon that could not be sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFailure {
    pub path: PathBuf,
    pub error: String,
    /// Whether the original was copied to the output directory.
    pub copied: bool,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub sanitized: usize,
    pub copied: usize,
    pub failures: Vec<IconFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.sanitized + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

enum IconOutcome {
    Sanitized,
    Failed(IconFailure),
}

/// Files in `dir` with the given extension (case-insensitive), sorted.
pub fn list_icons(dir: &Path, extension: &str) -> SanitizeResult<Vec<PathBuf>> {
    let mut icons = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            icons.push(path);
        }
    }
    icons.sort();
    Ok(icons)
}

/// Sanitizes every icon in `input` into `output`.
///
/// Only an input directory without icons is fatal. An icon that fails is
/// reported in [`BatchReport::failures`] and, with `copy_on_failure`, copied
/// through unchanged.
pub fn sanitize_directory(
    input: &Path,
    output: &Path,
    config: &Config,
) -> SanitizeResult<BatchReport> {
    config.validate()?;
    let extension = config.icon_extension();
    let icons = list_icons(input, extension)?;
    if icons.is_empty() {
        return Err(SanitizeError::NoIcons {
            dir: input.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    fs::create_dir_all(output)?;
    let sanitizer = Sanitizer::new(config.sanitize.clone());
    let copy_on_failure = config.batch.copy_on_failure;
    info!("Sanitizing {} icons from {}", icons.len(), input.display());

    let outcomes: Vec<IconOutcome> = icons
        .par_iter()
        .map(|path| process_icon(&sanitizer, path, output, copy_on_failure))
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            IconOutcome::Sanitized => report.sanitized += 1,
            IconOutcome::Failed(failure) => {
                if failure.copied {
                    report.copied += 1;
                }
                report.failures.push(failure);
            }
        }
    }

    info!(
        sanitized = report.sanitized,
        copied = report.copied,
        failed = report.failures.len(),
        "Batch complete: {}",
        output.display()
    );
    Ok(report)
}

fn process_icon(
    sanitizer: &Sanitizer,
    path: &Path,
    output: &Path,
    copy_on_failure: bool,
) -> IconOutcome {
    let Some(name) = path.file_name() else {
        return IconOutcome::Failed(IconFailure {
            path: path.to_path_buf(),
            error: "path has no file name".to_string(),
            copied: false,
        });
    };
    let target = output.join(name);

    let result = fs::read_to_string(path)
        .map_err(SanitizeError::from)
        .and_then(|text| sanitizer.sanitize(&text))
        .and_then(|svg| write_whole(&target, &svg));

    match result {
        Ok(()) => {
            debug!("Sanitized {}", path.display());
            IconOutcome::Sanitized
        }
        Err(err) => {
            warn!("Failed to sanitize {}: {}", path.display(), err);
            let copied = copy_on_failure
                && match fs::copy(path, &target) {
                    Ok(_) => true,
                    Err(copy_err) => {
                        warn!("Failed to copy {}: {}", path.display(), copy_err);
                        false
                    }
                };
            IconOutcome::Failed(IconFailure {
                path: path.to_path_buf(),
                error: err.to_string(),
                copied,
            })
        }
    }
}

/// Writes through a temporary file in the same directory, so `target` is
/// either absent or complete.
fn write_whole(target: &Path, contents: &str) -> SanitizeResult<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.persist(target).map_err(|err| err.error)?;
    Ok(())
}
