//! Wavefront OBJ loading.

mod parser;

pub use parser::ObjLoader;

use crate::model::Model;
use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
    path::PathBuf,
};

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal result of a single load: the whole model or the first failure.
pub type ParseOutcome = Result<Model>;

/// Record types that carry data and can therefore fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `v`
    Position,

    /// `vn`
    Normal,

    /// `f`
    Face,
}

impl RecordKind {
    /// Returns the OBJ keyword of this record type.
    pub fn keyword(self) -> &'static str {
        match self {
            RecordKind::Position => "v",
            RecordKind::Normal => "vn",
            RecordKind::Face => "f",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.keyword())
    }
}

/// Represents why a single record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordError {
    /// Not enough values in `v`, `vn` or `f`.
    NotEnoughData { found: usize, expected: usize },

    /// More values than allowed (only with `strict_arity`).
    TooManyValues { found: usize, expected: usize },

    /// A token could not be converted to a number.
    InvalidNumber(Box<str>),

    /// Malformed `f` index group (empty position, or too many sub-fields).
    InvalidFaceVertex,

    /// Zero, negative or otherwise unrepresentable index.
    InvalidIndex(Box<str>),

    /// Face index past the end of the position list (only with `check_index_bounds`).
    IndexOutOfRange { index: usize, count: usize },
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordError::NotEnoughData { found, expected } => write!(
                f,
                "Not enough data (found {}, expected {})",
                found, expected
            ),
            RecordError::TooManyValues { found, expected } => write!(
                f,
                "Too many values (found {}, expected {})",
                found, expected
            ),
            RecordError::InvalidNumber(token) => write!(f, "Invalid number \"{}\"", token),
            RecordError::InvalidFaceVertex => write!(f, "Invalid face vertex definition"),
            RecordError::InvalidIndex(token) => write!(f, "Invalid index \"{}\"", token),
            RecordError::IndexOutOfRange { index, count } => write!(
                f,
                "Index {} out of range ({} vertices defined)",
                index + 1,
                count
            ),
        }
    }
}

impl StdError for RecordError {}

/// Represents an error in loading OBJ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input source could not be opened.
    Open { path: PathBuf, reason: String },

    /// Reading the input failed at the given (1-based) line.
    Read { line: usize, reason: String },

    /// A recognized record failed validation at the given (1-based) line.
    Parse {
        line: usize,
        record: RecordKind,
        content: Box<str>,
        cause: RecordError,
    },
}

impl Error {
    /// Returns the 1-based line number this error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Open { .. } => None,
            Error::Read { line, .. } | Error::Parse { line, .. } => Some(*line),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Error::Open { path, reason } => {
                write!(f, "open error: {}: {}", path.display(), reason)
            }
            Error::Read { line, reason } => write!(f, "read error on line {}: {}", line, reason),
            Error::Parse {
                line,
                record,
                content,
                cause,
            } => write!(
                f,
                "parse error on line {}: {} ({} record: \"{}\")",
                line, cause, record, content
            ),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Parse { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_line_and_record() {
        let error = Error::Parse {
            line: 7,
            record: RecordKind::Position,
            content: "v 1.0 2.0".into(),
            cause: RecordError::NotEnoughData {
                found: 2,
                expected: 3,
            },
        };

        assert_eq!(error.line(), Some(7));
        let message = error.to_string();
        assert!(message.starts_with("parse error on line 7"));
        assert!(message.contains("v record"));
        assert!(message.contains("\"v 1.0 2.0\""));
        assert!(error.source().is_some());
    }

    #[test]
    fn open_error_embeds_path() {
        let error = Error::Open {
            path: PathBuf::from("missing/Cube.obj"),
            reason: "No such file or directory".into(),
        };

        assert_eq!(error.line(), None);
        assert!(error.to_string().starts_with("open error: missing/Cube.obj"));
    }

    #[test]
    fn out_of_range_reports_one_based_index() {
        let cause = RecordError::IndexOutOfRange { index: 4, count: 3 };
        assert_eq!(cause.to_string(), "Index 5 out of range (3 vertices defined)");
    }
}
