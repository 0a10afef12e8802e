//! Output writers for timelines and profile data.
//!
//! This module handles writing data to disk:
//! - SVG timelines
//! - JSON profiles

pub mod json;
pub mod svg;

// Re-export main functions
pub use json::{read_profile, write_profile};
pub use svg::write_svg;

use crate::utils::error::OutputError;
use log::debug;
use std::path::{Path, PathBuf};

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Default SVG path for an input trace: same name, `.svg` extension
///
/// Only the last extension is replaced, so `run_17.dfl.json` becomes
/// `run_17.dfl.svg`. An input already named `*.svg` maps to
/// `*.timeline.svg` so the trace is never overwritten.
pub fn default_output_path(input: &Path) -> PathBuf {
    let is_svg = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        input.with_extension("timeline.svg")
    } else {
        input.with_extension("svg")
    }
}

/// Create missing parent directories of an output path
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
