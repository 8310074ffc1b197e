//! Rendering of results to stdout, as text lines or JSON lines.

use std::io::{self, Write};
use std::str::FromStr;

use console::style;
use eollib::{ConvertSummary, EolStyle, PathEolInfo};
use serde::Serialize;

/// How results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One human readable line per path
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output mode: {other}")),
        }
    }
}

/// JSON record for one classified path
#[derive(Debug, Serialize)]
struct InfoRecord<'a> {
    path: &'a str,
    eol: EolStyle,
    suggested: eollib::Eol,
    description: String,
}

/// Human readable description, e.g. `Mixed, predominantly Unix (LF)`.
pub fn describe(info: &PathEolInfo) -> String {
    match info.detected {
        EolStyle::Mixed => format!(
            "{}, predominantly {}",
            EolStyle::Mixed.english_name(),
            info.suggested.english_name()
        ),
        detected => detected.english_name().to_string(),
    }
}

pub struct Renderer<W: Write> {
    out: W,
    mode: OutputMode,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self { out, mode }
    }

    fn json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)
    }

    fn record<'a>(info: &'a PathEolInfo, path: &'a str) -> InfoRecord<'a> {
        InfoRecord {
            path,
            eol: info.detected,
            suggested: info.suggested,
            description: describe(info),
        }
    }

    /// A line of list output.
    pub fn info(&mut self, info: &PathEolInfo) -> io::Result<()> {
        let path = info.path.to_string_lossy();
        match self.mode {
            OutputMode::Json => self.json(&Self::record(info, &path)),
            OutputMode::Text => {
                let description = describe(info);
                let description = if info.detected == EolStyle::Mixed {
                    style(description).yellow().to_string()
                } else {
                    description
                };
                writeln!(self.out, "{path}: {description}")
            }
        }
    }

    /// A line of find output.
    pub fn found(&mut self, info: &PathEolInfo) -> io::Result<()> {
        let path = info.path.to_string_lossy();
        match self.mode {
            OutputMode::Json => self.json(&Self::record(info, &path)),
            OutputMode::Text => writeln!(self.out, "{path}"),
        }
    }

    /// Conversion results. Text mode prints nothing: conversions are logged
    /// as they happen.
    pub fn summary(&mut self, summary: &ConvertSummary) -> io::Result<()> {
        #[derive(Serialize)]
        struct SummaryRecord<'a> {
            converted: &'a [std::path::PathBuf],
            unchanged: &'a [std::path::PathBuf],
            skipped: &'a [std::path::PathBuf],
        }

        match self.mode {
            OutputMode::Json => self.json(&SummaryRecord {
                converted: &summary.converted,
                unchanged: &summary.unchanged,
                skipped: &summary.skipped,
            }),
            OutputMode::Text => Ok(()),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
