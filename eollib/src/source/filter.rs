//! Include/exclude filtering on base names.
//!
//! Patterns use shell glob syntax (`*`, `?`, `[seq]`) and are matched
//! against the final path component only, so `*.log` excludes `a/b/c.log`
//! and `.git` prunes every `.git` directory at any depth.

use std::borrow::Cow;
use std::path::Path;

use glob::Pattern;

use crate::error::EolError;
use crate::report::FilterDecision;
use crate::Result;

/// Configuration for path filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include everything)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| EolError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Final component of `path`, or the whole path when it has none (`.`, `/`).
pub(crate) fn base_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
}

impl FilterConfig {
    /// Create a new empty filter config (accepts everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Decide whether `path` passes the filter.
    ///
    /// With `use_includes` false only the exclude patterns are consulted;
    /// this is how directories are checked before descending into them.
    pub fn decide(&self, path: &Path, use_includes: bool) -> FilterDecision {
        let base = base_name(path);
        let mut decision = FilterDecision::Unfiltered;

        if use_includes && !self.include.is_empty() {
            match self.include.iter().find(|p| p.matches(&base)) {
                Some(pattern) => decision = FilterDecision::Included(pattern.as_str().to_string()),
                None => return FilterDecision::NotIncluded,
            }
        }

        if let Some(pattern) = self.exclude.iter().find(|p| p.matches(&base)) {
            return FilterDecision::Excluded(pattern.as_str().to_string());
        }

        decision
    }

    /// Check if a path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. Its base name matches at least one include pattern (or include is empty)
    /// 2. Its base name doesn't match any exclude pattern
    pub fn matches(&self, path: &Path) -> bool {
        self.decide(path, true).is_accepted()
    }
}
