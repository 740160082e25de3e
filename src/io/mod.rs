#[cfg(feature = "svg-io")]
pub mod svg;

use crate::errors::GearError;

/// I/O errors around writing tooth profiles out.
///
/// Writers are behind cargo feature-flags; with every writer disabled only
/// the generic variants remain.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),
    /// Profile generation failed before anything could be written.
    Gear(GearError),
    MalformedPath(String),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),
            Gear(error) => write!(f, "Could not generate tooth profile: {error}"),
            MalformedPath(msg) => write!(f, "The path is malformed: {msg}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::StdIo(error) => Some(error),
            IoError::Gear(error) => Some(error),
            IoError::MalformedPath(_) => None,
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

impl From<GearError> for IoError {
    fn from(value: GearError) -> Self {
        Self::Gear(value)
    }
}
