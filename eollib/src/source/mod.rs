//! Source discovery: find the paths to work on.
//!
//! This module handles the first stage of every operation - turning the
//! path patterns given on the command line into concrete paths. It provides:
//!
//! - **Path resolution**: Globs, literal paths and recursive directory walks
//! - **Filtering**: Include/exclude glob patterns on base names
//!
//! ## Example
//!
//! ```rust,ignore
//! use eollib::source::{resolve_paths, FilterConfig, ResolveOptions};
//! use eollib::TracingReporter;
//!
//! let options = ResolveOptions::new()
//!     .recursive(true)
//!     .filter(FilterConfig::new().exclude(".git")?);
//! for path in resolve_paths(["src", "*.md"], &options, &TracingReporter) {
//!     println!("{}", path.display());
//! }
//! ```

pub mod filter;
pub mod resolve;

pub use filter::FilterConfig;
pub use resolve::{resolve_paths, DirsPolicy, Paths, ResolveOptions};
