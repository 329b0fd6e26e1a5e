//! Error and Result types used throughout the crate.

use crate::Tag;

/// An error from decoding, encoding or misusing a tag tree.
#[derive(Debug, Clone)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// The broad category of an [`Error`], for callers that want to react to
/// specific failures rather than just report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Structurally invalid input: bad length prefix, non-compound root,
    /// non-unicode string data, a non-empty list of TAG_End, and so on.
    MalformedData,

    /// The input ended part way through a tag.
    UnexpectedEof,

    /// A tag discriminant outside the known set.
    InvalidTag,

    /// A value was accessed as the wrong type, or an element of the wrong
    /// type was appended to a typed list.
    TypeMismatch,

    /// A tag was inserted into a compound under a name that is already taken.
    DuplicateName,

    /// A list was indexed out of bounds.
    IndexOutOfRange,

    /// The requested compression mode cannot be honored.
    UnsupportedCompression,

    /// Any other errors, mostly I/O. Users should not match on this variant
    /// and should instead use a wildcard `_`.
    Other,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::MalformedData,
        }
    }

    pub(crate) fn invalid_tag(t: u8) -> Self {
        Self {
            msg: format!("invalid tag: {}", t),
            kind: ErrorKind::InvalidTag,
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "unexpectedly ran out of input".into(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn nonunicode(data: &[u8]) -> Self {
        Self {
            msg: format!(
                "invalid string, non-unicode: {}",
                String::from_utf8_lossy(data)
            ),
            kind: ErrorKind::MalformedData,
        }
    }

    pub(crate) fn type_mismatch(expected: Tag, actual: Tag) -> Self {
        Self {
            msg: format!("expected {}, found {}", expected, actual),
            kind: ErrorKind::TypeMismatch,
        }
    }

    pub(crate) fn duplicate_name(name: &str) -> Self {
        Self {
            msg: format!("a tag named \"{}\" already exists", name),
            kind: ErrorKind::DuplicateName,
        }
    }

    pub(crate) fn index_out_of_range(index: usize, len: usize) -> Self {
        Self {
            msg: format!("index {} out of range for list of length {}", index, len),
            kind: ErrorKind::IndexOutOfRange,
        }
    }

    pub(crate) fn unsupported_compression(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::UnsupportedCompression,
        }
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self {
                msg: e.to_string(),
                kind: ErrorKind::UnexpectedEof,
            },
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Other,
            },
        }
    }
}
