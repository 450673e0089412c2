//! Error types.

use std::{fmt, io};

/// Why a color descriptor could not be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorErrorKind {
    /// Neither a known color name nor a grayscale level.
    UnknownName,
    /// A `#` string which is not `#rgb`, `#rgba`, `#rrggbb` or
    /// `#rrggbbaa`.
    InvalidHex,
    /// A component is not a finite number in \[0, 1\].
    OutOfRange,
}

/// The color argument cannot be resolved to RGB.
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidColorError {
    color: String,
    kind: ColorErrorKind,
}

impl InvalidColorError {
    pub(crate) fn new(color: impl Into<String>, kind: ColorErrorKind) -> Self {
        Self { color: color.into(), kind }
    }

    /// The offending color, as it was given.
    pub fn color(&self) -> &str { &self.color }

    pub fn kind(&self) -> ColorErrorKind { self.kind }
}

impl fmt::Display for InvalidColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.kind {
            ColorErrorKind::UnknownName => "unknown color name",
            ColorErrorKind::InvalidHex => "invalid hex color",
            ColorErrorKind::OutOfRange => "components must be within 0-1",
        };
        write!(f, "invalid color {:?}: {}", self.color, reason)
    }
}

impl std::error::Error for InvalidColorError {}

/// Errors of the plotting utilities.
#[derive(Debug)]
pub enum Error {
    /// Reading a track or writing a figure failed.
    Io(io::Error),
    /// The GPX document is not well-formed XML.
    Xml(roxmltree::Error),
    /// The GPX document is well-formed but not a valid track log.
    Gpx(String),
    Color(InvalidColorError),
    /// There are no coordinates to draw.
    EmptyTrack,
    /// Statistics were requested on an empty sample.
    EmptyData,
    /// A numeric parameter is outside its domain.
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Xml(e) => write!(f, "malformed GPX: {}", e),
            Error::Gpx(msg) => write!(f, "invalid GPX: {}", msg),
            Error::Color(e) => write!(f, "{}", e),
            Error::EmptyTrack => write!(f, "no GPS coordinates to plot"),
            Error::EmptyData => write!(f, "empty sample"),
            Error::InvalidParameter(msg) => {
                write!(f, "invalid parameter: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Xml(e) => Some(e),
            Error::Color(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self { Error::Io(e) }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self { Error::Xml(e) }
}

impl From<InvalidColorError> for Error {
    fn from(e: InvalidColorError) -> Self { Error::Color(e) }
}
