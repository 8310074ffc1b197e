//! EOL values and their name lookup tables.
//!
//! [`Eol`] is a concrete terminator that can be written to a file.
//! [`EolStyle`] is what detection reports: one uniform terminator, a mix,
//! or no terminators at all.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::EolError;
use crate::Result;

/// A concrete end-of-line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eol {
    /// `\r`, Mac OS 9 and earlier
    Cr,
    /// `\n`, Unix (and macOS)
    Lf,
    /// `\r\n`, Windows
    Crlf,
}

impl Eol {
    /// EOL conventional for the build target.
    #[cfg(windows)]
    pub const NATIVE: Eol = Eol::Crlf;
    /// EOL conventional for the build target.
    #[cfg(not(windows))]
    pub const NATIVE: Eol = Eol::Lf;

    pub const ALL: [Eol; 3] = [Eol::Crlf, Eol::Cr, Eol::Lf];

    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Eol::Cr => b"\r",
            Eol::Lf => b"\n",
            Eol::Crlf => b"\r\n",
        }
    }

    /// Short name, e.g. `"CRLF"`.
    pub fn name(self) -> &'static str {
        match self {
            Eol::Cr => "CR",
            Eol::Lf => "LF",
            Eol::Crlf => "CRLF",
        }
    }

    /// Human readable description, e.g. `"Windows (CRLF)"`.
    pub fn english_name(self) -> &'static str {
        match self {
            Eol::Cr => "Mac Classic (CR)",
            Eol::Lf => "Unix (LF)",
            Eol::Crlf => "Windows (CRLF)",
        }
    }

    pub fn is_native(self) -> bool {
        self == Eol::NATIVE
    }

    /// Rank used to break ties between two non-native styles with the same
    /// count. Higher wins.
    pub(crate) fn priority(self) -> u8 {
        match self {
            Eol::Lf => 0,
            Eol::Cr => 1,
            Eol::Crlf => 2,
        }
    }

    /// Look up the EOL for a raw terminator byte sequence.
    pub fn from_bytes(bytes: &[u8]) -> Result<Eol> {
        match bytes {
            b"\r" => Ok(Eol::Cr),
            b"\n" => Ok(Eol::Lf),
            b"\r\n" => Ok(Eol::Crlf),
            other => Err(EolError::UnknownEol(other.to_vec())),
        }
    }

    /// Parse a conversion target name.
    ///
    /// Accepts everything [`EolStyle::from_name`] does, but rejects `MIXED`
    /// and `NONE`, which cannot be written.
    pub fn from_name(name: &str) -> Result<Eol> {
        Eol::try_from(EolStyle::from_name(name)?)
    }
}

impl fmt::Display for Eol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Eol {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl FromStr for Eol {
    type Err = EolError;

    fn from_str(s: &str) -> Result<Self> {
        Eol::from_name(s)
    }
}

impl TryFrom<EolStyle> for Eol {
    type Error = EolError;

    fn try_from(style: EolStyle) -> Result<Self> {
        match style {
            EolStyle::Uniform(eol) => Ok(eol),
            other => Err(EolError::IllegalEol(other.name().to_string())),
        }
    }
}

/// The EOL style detected in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EolStyle {
    /// Every terminator is the same
    Uniform(Eol),
    /// More than one kind of terminator is present
    Mixed,
    /// No terminators at all
    None,
}

impl EolStyle {
    pub fn name(self) -> &'static str {
        match self {
            EolStyle::Uniform(eol) => eol.name(),
            EolStyle::Mixed => "MIXED",
            EolStyle::None => "NONE",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            EolStyle::Uniform(eol) => eol.english_name(),
            EolStyle::Mixed => "Mixed",
            EolStyle::None => "No EOLs",
        }
    }

    /// Parse a style name, case-insensitively.
    ///
    /// Besides the canonical names (`LF`, `CRLF`, `CR`, `MIXED`, `NONE`) this
    /// accepts `NATIVE` and the `UNIX`, `DOS` and `WINDOWS` aliases.
    pub fn from_name(name: &str) -> Result<EolStyle> {
        let style = match name.to_ascii_uppercase().as_str() {
            "CRLF" | "DOS" | "WINDOWS" => EolStyle::Uniform(Eol::Crlf),
            "CR" => EolStyle::Uniform(Eol::Cr),
            "LF" | "UNIX" => EolStyle::Uniform(Eol::Lf),
            "NATIVE" => EolStyle::Uniform(Eol::NATIVE),
            "MIXED" => EolStyle::Mixed,
            "NONE" => EolStyle::None,
            _ => return Err(EolError::UnknownEolName(name.to_string())),
        };
        Ok(style)
    }
}

impl From<Eol> for EolStyle {
    fn from(eol: Eol) -> Self {
        EolStyle::Uniform(eol)
    }
}

impl fmt::Display for EolStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EolStyle {
    type Err = EolError;

    fn from_str(s: &str) -> Result<Self> {
        EolStyle::from_name(s)
    }
}

impl Serialize for EolStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_names() {
        assert_eq!(Eol::Lf.english_name(), "Unix (LF)");
        assert_eq!(Eol::Crlf.english_name(), "Windows (CRLF)");
        assert_eq!(Eol::Cr.english_name(), "Mac Classic (CR)");
        assert_eq!(EolStyle::Mixed.english_name(), "Mixed");
        assert_eq!(EolStyle::None.english_name(), "No EOLs");
    }

    #[test]
    fn test_style_from_name() {
        assert_eq!(EolStyle::from_name("LF").unwrap(), Eol::Lf.into());
        assert_eq!(EolStyle::from_name("crlf").unwrap(), Eol::Crlf.into());
        assert_eq!(EolStyle::from_name("Cr").unwrap(), Eol::Cr.into());
        assert_eq!(EolStyle::from_name("native").unwrap(), Eol::NATIVE.into());
        assert_eq!(EolStyle::from_name("MIXED").unwrap(), EolStyle::Mixed);
        assert_eq!(EolStyle::from_name("none").unwrap(), EolStyle::None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Eol::from_name("unix").unwrap(), Eol::Lf);
        assert_eq!(Eol::from_name("DOS").unwrap(), Eol::Crlf);
        assert_eq!(Eol::from_name("Windows").unwrap(), Eol::Crlf);
    }

    #[test]
    fn test_unknown_name() {
        let err = EolStyle::from_name("mac").unwrap_err();
        assert!(matches!(err, EolError::UnknownEolName(ref n) if n == "mac"));
    }

    #[test]
    fn test_conversion_target_rejects_mixed_and_none() {
        assert!(matches!(
            Eol::from_name("mixed"),
            Err(EolError::IllegalEol(_))
        ));
        assert!(matches!(Eol::from_name("NONE"), Err(EolError::IllegalEol(_))));
        assert!(Eol::try_from(EolStyle::Mixed).is_err());
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(Eol::from_bytes(b"\n").unwrap(), Eol::Lf);
        assert_eq!(Eol::from_bytes(b"\r\n").unwrap(), Eol::Crlf);
        assert_eq!(Eol::from_bytes(b"\r").unwrap(), Eol::Cr);
        assert!(matches!(
            Eol::from_bytes(b"\n\r"),
            Err(EolError::UnknownEol(_))
        ));
    }

    #[test]
    fn test_name_round_trip_through_display() {
        for eol in Eol::ALL {
            assert_eq!(eol.to_string().parse::<Eol>().unwrap(), eol);
        }
    }
}
