//! Expand command-line path patterns into a stream of paths.
//!
//! This is what turns `eol -r -x '*.log' src 'docs/*.md'` into a list of
//! files. Patterns containing `*`, `?` or `[` are globbed, anything else is
//! taken literally. Directories are optionally walked depth-first, top-down,
//! with the files of each directory yielded in sorted order before any of
//! its subdirectories are entered.
//!
//! Three typical configurations:
//!
//! | Use case       | `files` | `dirs`           | `DIR` yields      | `-r DIR` yields        |
//! |----------------|---------|------------------|-------------------|------------------------|
//! | like `grep -r` | true    | `Never`          | nothing           | files under DIR        |
//! | like `file`    | true    | `IfNotRecursive` | DIR               | files under DIR        |
//! | like `find`    | true    | `Always`         | DIR               | DIR, dirs and files    |

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use glob::MatchOptions;
use walkdir::WalkDir;

use crate::report::Reporter;
use crate::source::filter::FilterConfig;

const GLOB_CHARS: &[char] = &['*', '?', '['];

/// When matched directories themselves are yielded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirsPolicy {
    /// Never yield directories
    #[default]
    Never,
    /// Yield every matched directory, including those found while recursing
    Always,
    /// Yield directories named by the patterns, but only without recursion
    IfNotRecursive,
}

/// Options controlling path resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Yield plain files
    pub files: bool,
    /// When to yield directories
    pub dirs: DirsPolicy,
    /// Walk matched directories to arbitrary depth
    pub recursive: bool,
    /// Base-name include/exclude patterns
    pub filter: FilterConfig,
    /// Never descend into the same directory twice
    pub skip_dupe_dirs: bool,
    /// Treat symlinks to directories as directories
    pub follow_symlinks: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            files: true,
            dirs: DirsPolicy::Never,
            recursive: false,
            filter: FilterConfig::default(),
            skip_dupe_dirs: false,
            follow_symlinks: false,
        }
    }
}

impl ResolveOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(mut self, files: bool) -> Self {
        self.files = files;
        self
    }

    pub fn dirs(mut self, dirs: DirsPolicy) -> Self {
        self.dirs = dirs;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set include/exclude filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn skip_dupe_dirs(mut self, skip: bool) -> Self {
        self.skip_dupe_dirs = skip;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Whether a directory named by a pattern is itself yielded.
    fn yields_top_dirs(&self) -> bool {
        match self.dirs {
            DirsPolicy::Never => false,
            DirsPolicy::Always => true,
            DirsPolicy::IfNotRecursive => !self.recursive,
        }
    }
}

/// Resolve `patterns` into paths.
///
/// The returned iterator is lazy: the filesystem is read as it is pulled.
/// Patterns that match nothing and directories that cannot be listed go to
/// `reporter` and resolution carries on.
///
/// ```rust
/// use eollib::{resolve_paths, FilterConfig, NullReporter, ResolveOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("a.txt"), "a\n").unwrap();
/// fs::write(dir.path().join("b.log"), "b\n").unwrap();
///
/// let options = ResolveOptions::new()
///     .recursive(true)
///     .filter(FilterConfig::new().exclude("*.log").unwrap());
/// let paths: Vec<_> = resolve_paths([dir.path().to_str().unwrap()], &options, &NullReporter)
///     .collect();
/// assert_eq!(paths, vec![dir.path().join("a.txt")]);
/// ```
pub fn resolve_paths<'r, I, S>(
    patterns: I,
    options: &ResolveOptions,
    reporter: &'r dyn Reporter,
) -> Paths<'r>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let patterns: Vec<String> = patterns
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect();

    Paths {
        patterns: patterns.into_iter(),
        options: options.clone(),
        reporter,
        matches: VecDeque::new(),
        stack: Vec::new(),
        pending: VecDeque::new(),
        searched: HashSet::new(),
    }
}

/// Lazy iterator returned by [`resolve_paths`].
pub struct Paths<'r> {
    patterns: std::vec::IntoIter<String>,
    options: ResolveOptions,
    reporter: &'r dyn Reporter,
    /// Top-level matches of the current pattern, not yet visited
    matches: VecDeque<PathBuf>,
    /// Directories waiting to be listed; the last one is listed next
    stack: Vec<PathBuf>,
    /// Paths ready to be yielded
    pending: VecDeque<PathBuf>,
    /// Canonical paths of directories already descended into
    searched: HashSet<PathBuf>,
}

impl Iterator for Paths<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(path) = self.pending.pop_front() {
                return Some(path);
            }
            if let Some(dir) = self.stack.pop() {
                self.walk_dir(&dir);
                continue;
            }
            if let Some(path) = self.matches.pop_front() {
                self.visit_top_level(path);
                continue;
            }
            let pattern = self.patterns.next()?;
            self.matches = self.expand_pattern(&pattern).into();
            if self.matches.is_empty() {
                self.reporter.no_match(&pattern);
            }
        }
    }
}

impl Paths<'_> {
    fn expand_pattern(&self, pattern: &str) -> Vec<PathBuf> {
        if pattern.contains(GLOB_CHARS) {
            let options = MatchOptions {
                require_literal_leading_dot: true,
                ..MatchOptions::new()
            };
            // An unbalanced `[` is not a valid glob; fall through and try the
            // pattern as a literal name.
            if let Ok(paths) = glob::glob_with(pattern, options) {
                return paths
                    .filter_map(|entry| match entry {
                        Ok(path) => Some(path),
                        Err(err) => {
                            self.reporter.walk_error(err.path(), err.error());
                            None
                        }
                    })
                    .collect();
            }
        }

        let path = PathBuf::from(pattern);
        let exists = if self.options.follow_symlinks {
            fs::metadata(&path).is_ok()
        } else {
            fs::symlink_metadata(&path).is_ok()
        };
        if exists {
            vec![path]
        } else {
            Vec::new()
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        if self.options.follow_symlinks || !path.is_symlink() {
            path.is_dir()
        } else {
            false
        }
    }

    fn accepts(&self, path: &Path, use_includes: bool) -> bool {
        let decision = self.options.filter.decide(path, use_includes);
        self.reporter.filtered(path, &decision);
        decision.is_accepted()
    }

    /// Record `dir` as searched. Returns false if it already was.
    fn mark_searched(&mut self, dir: &Path) -> bool {
        if !self.options.skip_dupe_dirs {
            return true;
        }
        let canonical = canonical_dir(dir, self.options.follow_symlinks);
        self.searched.insert(canonical)
    }

    fn was_searched(&self, dir: &Path) -> bool {
        self.options.skip_dupe_dirs
            && self
                .searched
                .contains(&canonical_dir(dir, self.options.follow_symlinks))
    }

    fn visit_top_level(&mut self, path: PathBuf) {
        if !self.is_dir(&path) {
            if self.options.files && self.accepts(&path, true) {
                self.pending.push_back(path);
            }
            return;
        }

        if !self.mark_searched(&path) {
            return;
        }

        // Includes decide whether a directory is yielded, never whether it
        // is recursed into.
        if self.options.yields_top_dirs() && self.accepts(&path, true) {
            self.pending.push_back(path.clone());
        }
        if self.options.recursive && self.accepts(&path, false) {
            self.stack.push(path);
        }
    }

    fn walk_dir(&mut self, dir: &Path) {
        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        let listing = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for entry in listing {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(dir).to_path_buf();
                    let err: io::Error = err.into();
                    self.reporter.walk_error(&path, &err);
                    if path == dir {
                        return;
                    }
                    continue;
                }
            };

            let is_dir = if self.options.follow_symlinks {
                entry.path().is_dir()
            } else {
                entry.file_type().is_dir()
            };
            if is_dir {
                subdirs.push(entry.into_path());
            } else {
                files.push(entry.into_path());
            }
        }

        subdirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut descend = Vec::with_capacity(subdirs.len());
        for subdir in subdirs {
            // A refused link is never entered, so it must not claim its
            // target as searched.
            let refused =
                self.options.follow_symlinks && subdir.is_symlink() && !links_deeper(dir, &subdir);
            let repeat = if refused {
                self.was_searched(&subdir)
            } else {
                !self.mark_searched(&subdir)
            };
            if repeat {
                continue;
            }
            if self.options.dirs == DirsPolicy::Always && self.accepts(&subdir, true) {
                self.pending.push_back(subdir.clone());
            }
            if !refused && self.accepts(&subdir, false) {
                descend.push(subdir);
            }
        }

        if self.options.files {
            for file in files {
                if self.accepts(&file, true) {
                    self.pending.push_back(file);
                }
            }
        }

        self.stack.extend(descend.into_iter().rev());
    }
}

/// Whether the symlink `link` in directory `parent` points strictly beneath
/// `parent`. Only such links are followed, which rules out cycles.
fn links_deeper(parent: &Path, link: &Path) -> bool {
    match (fs::canonicalize(parent), fs::canonicalize(link)) {
        (Ok(parent), Ok(target)) => target != parent && target.starts_with(&parent),
        _ => false,
    }
}

/// Key used to detect a directory being searched twice.
fn canonical_dir(dir: &Path, follow_symlinks: bool) -> PathBuf {
    let absolute = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    let normalized = normalize(&absolute);
    if follow_symlinks {
        fs::canonicalize(&normalized).unwrap_or(normalized)
    } else {
        normalized
    }
}

/// Lexically collapse `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
