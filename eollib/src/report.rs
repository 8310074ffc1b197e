//! Reporting hooks for path resolution and conversion.
//!
//! The library never configures logging itself. Operations that have
//! something to say (a pattern matched nothing, a directory could not be
//! listed, a file was converted or skipped) call into a [`Reporter`] passed
//! by the caller. The default method bodies emit `tracing` events, so
//! [`TracingReporter`] is just the trait with nothing overridden.

use std::fmt;
use std::io;
use std::path::Path;

use crate::eol::Eol;

/// Why a path was passed over without being classified or converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Contains a NUL byte
    Binary,
    /// Already has the target EOLs
    Unchanged,
    /// A symlink that could not be opened as a file
    Symlink,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Binary => "binary file (null in content)",
            SkipReason::Unchanged => "no change required",
            SkipReason::Symlink => "symlink",
        };
        f.write_str(s)
    }
}

/// Outcome of checking a path against include/exclude patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    /// No include or exclude pattern had a say
    Unfiltered,
    /// Base name matched this include pattern
    Included(String),
    /// Base name matched none of the include patterns
    NotIncluded,
    /// Base name matched this exclude pattern
    Excluded(String),
}

impl FilterDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            FilterDecision::Unfiltered | FilterDecision::Included(_)
        )
    }
}

pub trait Reporter {
    /// A path pattern expanded to nothing.
    fn no_match(&self, pattern: &str) {
        tracing::error!("`{pattern}': No such file or directory");
    }

    /// A directory could not be listed; its subtree is skipped.
    fn walk_error(&self, path: &Path, error: &io::Error) {
        tracing::warn!("`{}': {error}", path.display());
    }

    fn converted(&self, path: &Path, eol: Eol) {
        tracing::info!("converted `{}' to {} EOLs", path.display(), eol.name());
    }

    fn skipped(&self, path: &Path, reason: SkipReason) {
        tracing::debug!("skipped `{}': {reason}", path.display());
    }

    fn filtered(&self, path: &Path, decision: &FilterDecision) {
        match decision {
            FilterDecision::Unfiltered => {}
            FilterDecision::Included(pattern) => {
                tracing::trace!("include `{}' (matches `{pattern}')", path.display())
            }
            FilterDecision::NotIncluded => {
                tracing::trace!("exclude `{}' (matches no includes)", path.display())
            }
            FilterDecision::Excluded(pattern) => {
                tracing::trace!("exclude `{}' (matches `{pattern}')", path.display())
            }
        }
    }
}

/// Reports everything through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {}

/// Drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn no_match(&self, _pattern: &str) {}
    fn walk_error(&self, _path: &Path, _error: &io::Error) {}
    fn converted(&self, _path: &Path, _eol: Eol) {}
    fn skipped(&self, _path: &Path, _reason: SkipReason) {}
    fn filtered(&self, _path: &Path, _decision: &FilterDecision) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use super::*;

    /// Records reports for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        pub no_matches: RefCell<Vec<String>>,
        pub walk_errors: RefCell<Vec<PathBuf>>,
        pub converted: RefCell<Vec<(PathBuf, Eol)>>,
        pub skipped: RefCell<Vec<(PathBuf, SkipReason)>>,
    }

    impl Reporter for RecordingReporter {
        fn no_match(&self, pattern: &str) {
            self.no_matches.borrow_mut().push(pattern.to_string());
        }

        fn walk_error(&self, path: &Path, _error: &io::Error) {
            self.walk_errors.borrow_mut().push(path.to_path_buf());
        }

        fn converted(&self, path: &Path, eol: Eol) {
            self.converted.borrow_mut().push((path.to_path_buf(), eol));
        }

        fn skipped(&self, path: &Path, reason: SkipReason) {
            self.skipped.borrow_mut().push((path.to_path_buf(), reason));
        }
    }
}
