//! EOL detection and conversion over raw bytes.
//!
//! Nothing here does I/O. Input does not have to be valid UTF-8: only the
//! ASCII `\r` and `\n` bytes are ever inspected.

use serde::Serialize;

use crate::eol::{Eol, EolStyle};
use crate::Result;

/// Result of classifying a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EolInfo {
    /// What was actually found
    pub detected: EolStyle,
    /// The style to use for this text: the most common one, or
    /// [`Eol::NATIVE`] on a tie or when there are no EOLs
    pub suggested: Eol,
}

/// Number of terminators of each kind in a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EolCounts {
    pub crlf: usize,
    pub cr: usize,
    pub lf: usize,
}

impl EolCounts {
    /// Count terminators. A `\r\n` pair counts once, as CRLF only.
    pub fn from_text(text: &[u8]) -> Self {
        let crlf = text.windows(2).filter(|w| *w == b"\r\n").count();
        let cr = text.iter().filter(|&&b| b == b'\r').count() - crlf;
        let lf = text.iter().filter(|&&b| b == b'\n').count() - crlf;
        Self { crlf, cr, lf }
    }

    pub fn get(&self, eol: Eol) -> usize {
        match eol {
            Eol::Crlf => self.crlf,
            Eol::Cr => self.cr,
            Eol::Lf => self.lf,
        }
    }

    pub fn total(&self) -> usize {
        self.crlf + self.cr + self.lf
    }

    /// The most frequent style.
    ///
    /// Ties go to the native EOL; a tie between the two non-native styles
    /// goes to CRLF over CR over LF.
    pub fn dominant(&self) -> Eol {
        Eol::ALL
            .into_iter()
            .max_by_key(|&eol| (self.get(eol), eol.is_native(), eol.priority()))
            .unwrap_or(Eol::NATIVE)
    }

    /// How many distinct styles occur at least once.
    pub fn distinct(&self) -> usize {
        Eol::ALL.iter().filter(|&&eol| self.get(eol) > 0).count()
    }
}

/// Detect the EOL style of `text` and suggest one to use for it.
///
/// ```rust
/// use eollib::{eol_info_from_text, Eol, EolStyle};
///
/// let info = eol_info_from_text(b"foo\r\nbar");
/// assert_eq!(info.detected, EolStyle::Uniform(Eol::Crlf));
/// assert_eq!(info.suggested, Eol::Crlf);
///
/// let info = eol_info_from_text(b"\nfoo\nbar\r\n");
/// assert_eq!(info.detected, EolStyle::Mixed);
/// assert_eq!(info.suggested, Eol::Lf);
/// ```
pub fn eol_info_from_text(text: &[u8]) -> EolInfo {
    let counts = EolCounts::from_text(text);

    if counts.total() == 0 {
        return EolInfo {
            detected: EolStyle::None,
            suggested: Eol::NATIVE,
        };
    }

    let suggested = counts.dominant();
    let detected = if counts.distinct() > 1 {
        EolStyle::Mixed
    } else {
        EolStyle::Uniform(suggested)
    };

    EolInfo {
        detected,
        suggested,
    }
}

/// Replace every `\r\n`, `\r` and `\n` in `text` with `eol`.
///
/// A `\r\n` pair is replaced as one unit.
///
/// ```rust
/// use eollib::{convert_text_eol, Eol};
///
/// assert_eq!(convert_text_eol(b"foo\r\nbar", Eol::Lf), b"foo\nbar");
/// ```
pub fn convert_text_eol(text: &[u8], eol: Eol) -> Vec<u8> {
    let target = eol.as_bytes();
    let mut out = Vec::with_capacity(text.len() + text.len() / 16);
    let mut i = 0;

    while i < text.len() {
        match text[i] {
            b'\r' if text.get(i + 1) == Some(&b'\n') => {
                out.extend_from_slice(target);
                i += 2;
                continue;
            }
            b'\r' | b'\n' => out.extend_from_slice(target),
            b => out.push(b),
        }
        i += 1;
    }

    out
}

/// Like [`convert_text_eol`], for callers holding a detected style.
///
/// Fails with [`EolError::IllegalEol`](crate::EolError::IllegalEol) for
/// `Mixed` and `None`.
pub fn convert_text_to_style(text: &[u8], style: EolStyle) -> Result<Vec<u8>> {
    let eol = Eol::try_from(style)?;
    Ok(convert_text_eol(text, eol))
}

/// Iterate over the terminator of each line, `None` for an unterminated
/// final line.
fn line_terminators(text: &[u8]) -> impl Iterator<Item = Option<Eol>> + '_ {
    let mut pos = 0;
    std::iter::from_fn(move || {
        if pos >= text.len() {
            return None;
        }
        let rest = &text[pos..];
        match rest.iter().position(|&b| b == b'\r' || b == b'\n') {
            Some(i) if rest[i] == b'\r' && rest.get(i + 1) == Some(&b'\n') => {
                pos += i + 2;
                Some(Some(Eol::Crlf))
            }
            Some(i) => {
                pos += i + 1;
                Some(Some(if rest[i] == b'\r' { Eol::Cr } else { Eol::Lf }))
            }
            None => {
                pos = text.len();
                Some(None)
            }
        }
    })
}

/// 0-based indices of lines whose EOL differs from `expected`.
///
/// When `expected` is `None` the most common EOL in the text is used, with
/// the same tie-breaking as [`eol_info_from_text`]. An unterminated last line
/// never counts as mismatched.
///
/// ```rust
/// use eollib::{mixed_eol_lines_in_text, Eol};
///
/// let s = b"line0\nline1\r\nline2\nline3\nline4\r\nline5";
/// assert_eq!(mixed_eol_lines_in_text(s, None), vec![1, 4]);
/// assert_eq!(mixed_eol_lines_in_text(s, Some(Eol::Crlf)), vec![0, 2, 3]);
/// ```
pub fn mixed_eol_lines_in_text(text: &[u8], expected: Option<Eol>) -> Vec<usize> {
    let terminators: Vec<Option<Eol>> = line_terminators(text).collect();

    let expected = expected.unwrap_or_else(|| {
        let mut counts = EolCounts::default();
        for eol in terminators.iter().flatten() {
            match eol {
                Eol::Crlf => counts.crlf += 1,
                Eol::Cr => counts.cr += 1,
                Eol::Lf => counts.lf += 1,
            }
        }
        counts.dominant()
    });

    terminators
        .iter()
        .enumerate()
        .filter_map(|(i, eol)| match eol {
            Some(eol) if *eol != expected => Some(i),
            _ => None,
        })
        .collect()
}

/// Whether `content` looks binary: it contains a NUL byte.
pub fn is_binary(content: &[u8]) -> bool {
    content.contains(&0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"line0\nline1\r\nline2\nline3\nline4\r\nline5";

    /// The non-native style that is not CR, used for tie tests.
    fn other_than_native() -> Eol {
        if Eol::NATIVE == Eol::Lf {
            Eol::Crlf
        } else {
            Eol::Lf
        }
    }

    #[test]
    fn test_no_eols() {
        let texts: [&[u8]; 3] = [b"", b"foo", b"foo bar\tbaz"];
        for text in texts {
            let info = eol_info_from_text(text);
            assert_eq!(info.detected, EolStyle::None);
            assert_eq!(info.suggested, Eol::NATIVE);
        }
    }

    #[test]
    fn test_uniform_styles() {
        let cases: [(&[u8], Eol); 3] = [
            (b"foo\nbar\n", Eol::Lf),
            (b"foo\r\nbar\r\n", Eol::Crlf),
            (b"foo\rbar\r", Eol::Cr),
        ];
        for (text, eol) in cases {
            let info = eol_info_from_text(text);
            assert_eq!(info.detected, EolStyle::Uniform(eol));
            assert_eq!(info.suggested, eol);
        }
    }

    #[test]
    fn test_crlf_not_counted_as_cr_and_lf() {
        let counts = EolCounts::from_text(b"a\r\nb\r\nc\r\n");
        assert_eq!(
            counts,
            EolCounts {
                crlf: 3,
                cr: 0,
                lf: 0
            }
        );
    }

    #[test]
    fn test_lf_cr_is_two_terminators() {
        let counts = EolCounts::from_text(b"a\n\rb");
        assert_eq!(counts.lf, 1);
        assert_eq!(counts.cr, 1);
        assert_eq!(counts.crlf, 0);
    }

    #[test]
    fn test_mixed_suggests_most_common() {
        let info = eol_info_from_text(SAMPLE);
        assert_eq!(info.detected, EolStyle::Mixed);
        assert_eq!(info.suggested, Eol::Lf);

        let info = eol_info_from_text(b"a\r\nb\r\nc\rd\n");
        assert_eq!(info.detected, EolStyle::Mixed);
        assert_eq!(info.suggested, Eol::Crlf);
    }

    #[test]
    fn test_tie_prefers_native() {
        let other = other_than_native();
        let mut text = b"a".to_vec();
        text.extend_from_slice(Eol::NATIVE.as_bytes());
        text.extend_from_slice(b"b");
        text.extend_from_slice(other.as_bytes());

        let info = eol_info_from_text(&text);
        assert_eq!(info.detected, EolStyle::Mixed);
        assert_eq!(info.suggested, Eol::NATIVE);
    }

    #[test]
    fn test_tie_between_non_native_styles_is_fixed() {
        // Native appears once, the two others twice each.
        let mut text = Vec::new();
        for eol in Eol::ALL {
            let n = if eol.is_native() { 1 } else { 2 };
            for _ in 0..n {
                text.extend_from_slice(b"x");
                text.extend_from_slice(eol.as_bytes());
            }
        }
        let expected = if Eol::NATIVE == Eol::Crlf {
            Eol::Cr
        } else {
            Eol::Crlf
        };
        assert_eq!(eol_info_from_text(&text).suggested, expected);
    }

    #[test]
    fn test_non_utf8_input() {
        let info = eol_info_from_text(&[0xff, 0xfe, b'\r', 0x80, b'\r']);
        assert_eq!(info.detected, EolStyle::Uniform(Eol::Cr));
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert_text_eol(b"foo\r\nbar", Eol::Lf), b"foo\nbar");
        assert_eq!(
            convert_text_eol(SAMPLE, Eol::Lf),
            b"line0\nline1\nline2\nline3\nline4\nline5"
        );
        assert_eq!(
            convert_text_eol(SAMPLE, Eol::Crlf),
            b"line0\r\nline1\r\nline2\r\nline3\r\nline4\r\nline5"
        );
        assert_eq!(convert_text_eol(b"a\n\rb\r", Eol::Cr), b"a\r\rb\r");
    }

    #[test]
    fn test_convert_via_style() {
        assert_eq!(
            convert_text_to_style(b"a\nb", EolStyle::Uniform(Eol::Crlf)).unwrap(),
            b"a\r\nb"
        );
        assert!(convert_text_to_style(b"a\nb", EolStyle::Mixed).is_err());
        assert!(convert_text_to_style(b"a\nb", EolStyle::None).is_err());
    }

    #[test]
    fn test_reconversion_matches_direct_conversion() {
        let texts: [&[u8]; 4] = [SAMPLE, b"\r\r\n\n\n\r", b"no eols", b"\r\n"];
        for text in texts {
            for a in Eol::ALL {
                for b in Eol::ALL {
                    assert_eq!(
                        convert_text_eol(&convert_text_eol(text, a), b),
                        convert_text_eol(text, b),
                        "{a} then {b} on {text:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_convert_preserves_line_count() {
        let before = EolCounts::from_text(SAMPLE).total();
        for eol in Eol::ALL {
            let converted = convert_text_eol(SAMPLE, eol);
            let after = EolCounts::from_text(&converted);
            assert_eq!(after.total(), before);
            assert_eq!(after.get(eol), before);
        }
    }

    #[test]
    fn test_mixed_lines() {
        assert_eq!(mixed_eol_lines_in_text(SAMPLE, None), vec![1, 4]);
        assert_eq!(
            mixed_eol_lines_in_text(SAMPLE, Some(Eol::Crlf)),
            vec![0, 2, 3]
        );
        assert_eq!(
            mixed_eol_lines_in_text(SAMPLE, Some(Eol::Cr)),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn test_mixed_lines_uniform_and_empty() {
        assert!(mixed_eol_lines_in_text(b"a\nb\nc", None).is_empty());
        assert!(mixed_eol_lines_in_text(b"", None).is_empty());
        assert!(mixed_eol_lines_in_text(b"no eols", Some(Eol::Cr)).is_empty());
    }

    #[test]
    fn test_mixed_lines_with_blank_lines() {
        // "\r" ends line 1, "\r\n" ends line 2, "\n" ends line 3
        assert_eq!(mixed_eol_lines_in_text(b"a\n\r\r\n\n", None), vec![1, 2]);
    }

    #[test]
    fn test_is_binary() {
        assert!(is_binary(b"abc\0def"));
        assert!(!is_binary(b"abc\r\ndef"));
        assert!(!is_binary(b""));
    }
}
