//! # eollib
//!
//! Detect, report and normalize end-of-line (EOL) conventions in text files.
//!
//! ## Overview
//!
//! Text files end their lines with one of three byte sequences:
//!
//! - **LF** (`\n`): Unix, Linux, macOS
//! - **CRLF** (`\r\n`): Windows, DOS
//! - **CR** (`\r`): Mac OS 9 and earlier
//!
//! A file can also use several of them at once (**mixed**) or have no line
//! breaks at all (**none**). This library classifies raw bytes, converts
//! them to a target EOL, points out the lines that break the dominant
//! convention, and resolves command-line path patterns into the files to
//! work on.
//!
//! ## Features
//!
//! - **Byte-level**: Input need not be valid UTF-8; only CR and LF bytes matter
//! - **Suggested EOL**: Every classification comes with a concrete EOL to
//!   use, preferring the platform's native one on a tie
//! - **Minimal writes**: Files already in the target style are never rewritten
//! - **Path patterns**: Globs, recursive walks, include/exclude filters and
//!   cycle-safe symlink following
//! - **Pluggable reporting**: Diagnostics go to a caller-supplied [`Reporter`]
//!
//! ## Example
//!
//! ```rust
//! use eollib::{
//!     convert_path_patterns_eol, eol_info_from_text, mixed_eol_lines_in_text,
//!     Eol, EolStyle, NullReporter, ResolveOptions,
//! };
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let text = b"line0\nline1\r\nline2\nline3\nline4\r\nline5";
//! let info = eol_info_from_text(text);
//! assert_eq!(info.detected, EolStyle::Mixed);
//! assert_eq!(info.suggested, Eol::Lf);
//! assert_eq!(mixed_eol_lines_in_text(text, None), vec![1, 4]);
//!
//! // Convert a whole tree to Unix line endings
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("dos.txt"), "a\r\nb\r\n").unwrap();
//! let options = ResolveOptions::new().recursive(true);
//! let summary = convert_path_patterns_eol(
//!     [dir.path().to_str().unwrap()],
//!     Eol::Lf,
//!     &options,
//!     &NullReporter,
//! )
//! .unwrap();
//! assert_eq!(summary.converted.len(), 1);
//! assert_eq!(fs::read(dir.path().join("dos.txt")).unwrap(), b"a\nb\n");
//! ```

pub mod classify;
pub mod eol;
pub mod error;
pub mod file;
pub mod report;
pub mod source;

pub use classify::{
    convert_text_eol, convert_text_to_style, eol_info_from_text, is_binary,
    mixed_eol_lines_in_text, EolCounts, EolInfo,
};
pub use eol::{Eol, EolStyle};
pub use error::EolError;
pub use file::{
    convert_path_eol, convert_path_patterns_eol, eol_info_from_path,
    eol_info_from_path_patterns, ConvertOutcome, ConvertSummary, PathEolInfo, PathEolInfos,
};
pub use report::{FilterDecision, NullReporter, Reporter, SkipReason, TracingReporter};
pub use source::{resolve_paths, DirsPolicy, FilterConfig, Paths, ResolveOptions};

/// Result type for eollib operations
pub type Result<T> = std::result::Result<T, EolError>;
