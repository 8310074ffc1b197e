//! # eol
//!
//! A CLI tool for working with the end-of-line style of text files:
//! determining it, finding files by it and converting between styles.
//!
//! ## Overview
//!
//! eol is built on top of eollib. Binary files (any file with a NUL byte in
//! its content) are skipped.
//!
//! ## Usage
//!
//! ```bash
//! # List the EOL style of files
//! eol README.md src/*.c
//!
//! # Convert files in place (LF, CRLF, CR, NATIVE, or the unix/dos/windows aliases)
//! eol -c unix -r src
//!
//! # Find files with a given style (also NONE and MIXED)
//! eol -f mixed -r . -x .git
//!
//! # Machine readable output
//! eol -r . --output json
//! ```

mod logging;
mod render;
mod selftest;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use eollib::{
    convert_path_patterns_eol, eol_info_from_path_patterns, Eol, EolStyle, FilterConfig,
    ResolveOptions, TracingReporter,
};

use crate::logging::Verbosity;
use crate::render::{OutputMode, Renderer};

/// What the invocation asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Convert(Eol),
    Find(EolStyle),
    Test,
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("eol")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Report, find and convert the EOL style of text files")
        .arg(
            Arg::new("path")
                .value_name("FILE")
                .action(ArgAction::Append)
                .help("Files, directories or glob patterns"),
        )
        .arg(
            Arg::new("convert")
                .short('c')
                .long("convert")
                .value_name("NAME")
                .help(
                    "Convert file(s) to the given EOL; NAME must be one of \"LF\", \"CRLF\", \
                     \"CR\", \"NATIVE\" or the \"unix\", \"dos\" or \"windows\" aliases \
                     (case-insensitive)",
                ),
        )
        .arg(
            Arg::new("find")
                .short('f')
                .long("find")
                .value_name("NAME")
                .help(
                    "Find and list file(s) with the given EOL-style; NAME must be one of \
                     \"LF\", \"CRLF\", \"CR\", \"NATIVE\", \"NONE\", \"MIXED\" or the \"unix\", \
                     \"dos\" or \"windows\" aliases (case-insensitive)",
                ),
        )
        .arg(
            Arg::new("test")
                .long("test")
                .action(ArgAction::SetTrue)
                .help("Run self-test and exit"),
        )
        .group(
            ArgGroup::new("action")
                .args(["convert", "find", "test"])
                .multiple(false),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("Recursively search directories"),
        )
        .arg(
            Arg::new("skip")
                .short('x')
                .long("skip")
                .value_name("PATTERN")
                .action(ArgAction::Append)
                .help("Exclude files and directories whose name matches glob pattern"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .value_name("PATTERN")
                .action(ArgAction::Append)
                .help("Only consider files whose name matches glob pattern"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .overrides_with("quiet")
                .help("More verbose output"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .overrides_with("verbose")
                .help("Quieter output (just warnings and errors)"),
        )
}

/// Extract the action from matches
fn extract_action(matches: &ArgMatches) -> Result<Action, anyhow::Error> {
    if let Some(name) = matches.get_one::<String>("convert") {
        let eol = Eol::from_name(name)
            .with_context(|| format!("illegal EOL name for conversion: {name:?}"))?;
        return Ok(Action::Convert(eol));
    }
    if let Some(name) = matches.get_one::<String>("find") {
        return Ok(Action::Find(EolStyle::from_name(name)?));
    }
    if matches.get_flag("test") {
        return Ok(Action::Test);
    }
    Ok(Action::List)
}

/// Build resolve options from matches
fn build_options(matches: &ArgMatches) -> Result<ResolveOptions, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("skip") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(ResolveOptions::new()
        .recursive(matches.get_flag("recursive"))
        .filter(filter))
}

/// Extract path patterns from matches
fn extract_patterns(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("path")
        .map(|v| v.cloned().collect())
        .unwrap_or_default()
}

fn run(matches: &ArgMatches) -> Result<ExitCode, anyhow::Error> {
    let action = extract_action(matches)?;
    tracing::debug!("action: {action:?}");

    let options = build_options(matches)?;
    let patterns = extract_patterns(matches);
    let mode = matches
        .get_one::<String>("output")
        .map(|s| s.parse::<OutputMode>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();
    let reporter = TracingReporter;
    let mut renderer = Renderer::new(io::stdout().lock(), mode);

    match action {
        Action::List => {
            for info in eol_info_from_path_patterns(&patterns, &options, &reporter) {
                renderer.info(&info?)?;
            }
        }
        Action::Find(style) => {
            for info in eol_info_from_path_patterns(&patterns, &options, &reporter) {
                let info = info?;
                if info.detected == style {
                    renderer.found(&info)?;
                }
            }
        }
        Action::Convert(eol) => {
            let summary = convert_path_patterns_eol(&patterns, eol, &options, &reporter)?;
            renderer.summary(&summary)?;
        }
        Action::Test => {
            let failed = selftest::run();
            return Ok(ExitCode::from(u8::try_from(failed).unwrap_or(u8::MAX)));
        }
    }

    renderer.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Whether the error comes from writing to a closed pipe (e.g. `eol -r . | head`)
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    let verbosity = Verbosity::from_flags(matches.get_flag("verbose"), matches.get_flag("quiet"));
    logging::init_subscriber(verbosity);

    match run(&matches) {
        Ok(code) => code,
        Err(e) if is_broken_pipe(&e) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e:#}");
            if verbosity == Verbosity::Verbose {
                eprintln!("\n{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
