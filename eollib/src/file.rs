//! File and path-pattern level operations.
//!
//! Files are read whole into memory. Conversion overwrites the file in place
//! and only when the converted bytes differ, so files that already have the
//! target EOLs keep their modification time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classify::{convert_text_eol, eol_info_from_text, is_binary, EolInfo};
use crate::eol::{Eol, EolStyle};
use crate::error::EolError;
use crate::report::{Reporter, SkipReason};
use crate::source::{resolve_paths, Paths, ResolveOptions};
use crate::Result;

/// EOL info for one resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEolInfo {
    pub path: PathBuf,
    pub detected: EolStyle,
    pub suggested: Eol,
}

/// What [`convert_path_eol`] did with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// The file was rewritten
    Converted,
    /// The file already had the target EOLs and was not touched
    Unchanged,
    /// The file looks binary and was not touched
    SkippedBinary,
}

/// Tally of a batch conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub converted: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    /// Binary files and unreadable symlinks
    pub skipped: Vec<PathBuf>,
}

impl ConvertSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.converted.len() + self.unchanged.len() + self.skipped.len()
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| EolError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// A symlink that is dangling or points at a directory cannot be read as a
/// file; such paths come out of resolution when symlinks are not followed.
fn is_unreadable_symlink(path: &Path) -> bool {
    path.is_symlink() && (!path.exists() || path.is_dir())
}

/// Classify the EOLs of the file at `path`.
pub fn eol_info_from_path(path: impl AsRef<Path>) -> Result<EolInfo> {
    let content = read_file(path.as_ref())?;
    Ok(eol_info_from_text(&content))
}

/// Convert the file at `path` in place to `eol`.
///
/// With `skip_binary` set, files containing a NUL byte are left alone.
/// The file is only written when its content actually changes.
pub fn convert_path_eol(
    path: impl AsRef<Path>,
    eol: Eol,
    skip_binary: bool,
    reporter: &dyn Reporter,
) -> Result<ConvertOutcome> {
    let path = path.as_ref();
    let original = read_file(path)?;

    if skip_binary && is_binary(&original) {
        reporter.skipped(path, SkipReason::Binary);
        return Ok(ConvertOutcome::SkippedBinary);
    }

    let converted = convert_text_eol(&original, eol);
    if converted == original {
        reporter.skipped(path, SkipReason::Unchanged);
        return Ok(ConvertOutcome::Unchanged);
    }

    fs::write(path, &converted).map_err(|source| EolError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    reporter.converted(path, eol);
    Ok(ConvertOutcome::Converted)
}

/// Classify every text file matched by `patterns`.
///
/// Binary files and symlinks that cannot be read as files are skipped. A
/// read error is yielded in place of that path and iteration continues.
pub fn eol_info_from_path_patterns<'r, I, S>(
    patterns: I,
    options: &ResolveOptions,
    reporter: &'r dyn Reporter,
) -> PathEolInfos<'r>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    PathEolInfos {
        paths: resolve_paths(patterns, options, reporter),
        reporter,
    }
}

/// Iterator returned by [`eol_info_from_path_patterns`].
pub struct PathEolInfos<'r> {
    paths: Paths<'r>,
    reporter: &'r dyn Reporter,
}

impl Iterator for PathEolInfos<'_> {
    type Item = Result<PathEolInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        for path in self.paths.by_ref() {
            if is_unreadable_symlink(&path) {
                self.reporter.skipped(&path, SkipReason::Symlink);
                continue;
            }
            let content = match read_file(&path) {
                Ok(content) => content,
                Err(e) => return Some(Err(e)),
            };
            if is_binary(&content) {
                self.reporter.skipped(&path, SkipReason::Binary);
                continue;
            }
            let info = eol_info_from_text(&content);
            return Some(Ok(PathEolInfo {
                path,
                detected: info.detected,
                suggested: info.suggested,
            }));
        }
        None
    }
}

/// Convert every file matched by `patterns` in place to `eol`.
///
/// Binary files are skipped. Stops at the first file that cannot be read or
/// written.
pub fn convert_path_patterns_eol<I, S>(
    patterns: I,
    eol: Eol,
    options: &ResolveOptions,
    reporter: &dyn Reporter,
) -> Result<ConvertSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = ConvertSummary::new();

    for path in resolve_paths(patterns, options, reporter) {
        if is_unreadable_symlink(&path) {
            reporter.skipped(&path, SkipReason::Symlink);
            summary.skipped.push(path);
            continue;
        }
        match convert_path_eol(&path, eol, true, reporter)? {
            ConvertOutcome::Converted => summary.converted.push(path),
            ConvertOutcome::Unchanged => summary.unchanged.push(path),
            ConvertOutcome::SkippedBinary => summary.skipped.push(path),
        }
    }

    Ok(summary)
}
