use std::{fmt, io};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The line looks like a section header that went wrong, e.g. `foo[]`.
    #[error("malformed line{location}: {line:?}")]
    Format { line: String, location: Location },
    #[error("failed to read data{location}")]
    Read {
        #[source]
        source: io::Error,
        location: Location,
    },
}

impl ParseError {
    #[must_use]
    pub fn location(&self) -> &Location {
        match *self {
            Self::Format { ref location, .. } | Self::Read { ref location, .. } => location,
        }
    }

    pub(crate) fn at(mut self, source: Option<&str>, line: usize) -> Self {
        match self {
            Self::Format {
                ref mut location, ..
            }
            | Self::Read {
                ref mut location, ..
            } => {
                location.source = source.map(str::to_owned);
                location.line = Some(line);
            }
        }

        self
    }
}

/// Where in the input an error happened, as far as it is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub source: Option<String>,
    /// 1-based.
    pub line: Option<usize>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line) {
            (Some(source), Some(line)) => write!(f, " at {source}:{line}"),
            (Some(source), None) => write!(f, " in {source}"),
            (None, Some(line)) => write!(f, " on line {line}"),
            (None, None) => Ok(()),
        }
    }
}
