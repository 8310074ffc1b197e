//! `eol --test`: check the documented behaviour of the classifier against
//! the build at hand.

use eollib::{
    convert_text_eol, eol_info_from_text, mixed_eol_lines_in_text, Eol, EolInfo, EolStyle,
};

const SAMPLE: &[u8] = b"line0\nline1\r\nline2\nline3\nline4\r\nline5";

struct Check {
    name: &'static str,
    passed: fn() -> bool,
}

fn info(detected: EolStyle, suggested: Eol) -> EolInfo {
    EolInfo {
        detected,
        suggested,
    }
}

const CHECKS: &[Check] = &[
    Check {
        name: "LF text",
        passed: || eol_info_from_text(b"foo\nbar") == info(Eol::Lf.into(), Eol::Lf),
    },
    Check {
        name: "CRLF text",
        passed: || eol_info_from_text(b"foo\r\nbar") == info(Eol::Crlf.into(), Eol::Crlf),
    },
    Check {
        name: "text without EOLs",
        passed: || eol_info_from_text(b"foo") == info(EolStyle::None, Eol::NATIVE),
    },
    Check {
        name: "mixed text",
        passed: || eol_info_from_text(b"\nfoo\nbar\r\n") == info(EolStyle::Mixed, Eol::Lf),
    },
    Check {
        name: "convert to LF",
        passed: || {
            convert_text_eol(SAMPLE, Eol::Lf) == b"line0\nline1\nline2\nline3\nline4\nline5"
        },
    },
    Check {
        name: "convert to CRLF",
        passed: || {
            convert_text_eol(SAMPLE, Eol::Crlf)
                == b"line0\r\nline1\r\nline2\r\nline3\r\nline4\r\nline5"
        },
    },
    Check {
        name: "mixed lines against dominant EOL",
        passed: || mixed_eol_lines_in_text(SAMPLE, None) == [1, 4],
    },
    Check {
        name: "mixed lines against CRLF",
        passed: || mixed_eol_lines_in_text(SAMPLE, Some(Eol::Crlf)) == [0, 2, 3],
    },
    Check {
        name: "english names",
        passed: || {
            Eol::Lf.english_name() == "Unix (LF)"
                && Eol::Crlf.english_name() == "Windows (CRLF)"
                && Eol::Cr.english_name() == "Mac Classic (CR)"
                && EolStyle::Mixed.english_name() == "Mixed"
                && EolStyle::None.english_name() == "No EOLs"
        },
    },
    Check {
        name: "name lookup",
        passed: || {
            Eol::from_name("LF").ok() == Some(Eol::Lf)
                && Eol::from_name("CRLF").ok() == Some(Eol::Crlf)
                && Eol::from_name("CR").ok() == Some(Eol::Cr)
                && Eol::from_name("NATIVE").ok() == Some(Eol::NATIVE)
                && EolStyle::from_name("MIXED").ok() == Some(EolStyle::Mixed)
        },
    },
];

/// Run every check, logging failures. Returns the number of failures.
pub fn run() -> usize {
    let mut failed = 0;
    for check in CHECKS {
        if (check.passed)() {
            tracing::debug!("ok: {}", check.name);
        } else {
            tracing::error!("self-test failed: {}", check.name);
            failed += 1;
        }
    }
    tracing::debug!("{} checks, {failed} failed", CHECKS.len());
    failed
}
