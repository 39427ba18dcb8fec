//! Error types for xmldict

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }

    /// True for errors that carry no source location (unparse errors)
    pub const fn is_empty(&self) -> bool {
        self.start.line == 0 && self.end.line == 0
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An attribute name with no `=value` part
    MalformedAttribute { name: String },
    /// A closing tag that does not match the open element
    TagMismatch { expected: String, found: String },
    /// Any other structurally invalid markup
    Syntax,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    /// The value handed to `unparse` is not a single-entry mapping
    InvalidRoot,
    /// A mapping key that cannot be used as an XML name
    InvalidName { name: String },
    /// An attribute key whose value is neither a scalar nor null
    InvalidAttributeValue { name: String },
    /// The text key holds a mapping or a list
    InvalidText,
    /// A list directly inside another list
    NestedList { name: String },
    /// A pretty-print indent holding something other than XML whitespace
    InvalidIndent { indent: String },
    /// Text or an attribute value holding a character XML cannot represent
    InvalidCharacter { ch: char },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedAttribute { name } => {
                write!(f, "malformed attribute: `{name}` has no value")
            }
            Self::TagMismatch { expected, found } => {
                write!(f, "mismatched closing tag: expected </{expected}>, found </{found}>")
            }
            Self::Syntax => write!(f, "syntax error"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::InvalidRoot => write!(f, "document must have exactly one root element"),
            Self::InvalidName { name } => write!(f, "invalid xml name: {name:?}"),
            Self::InvalidAttributeValue { name } => {
                write!(f, "attribute `{name}` must hold a scalar or null")
            }
            Self::InvalidText => write!(f, "text content must be a scalar or null"),
            Self::NestedList { name } => write!(f, "list of lists under `{name}`"),
            Self::InvalidIndent { indent } => {
                write!(f, "indent must be xml whitespace, got {indent:?}")
            }
            Self::InvalidCharacter { ch } => {
                write!(f, "character U+{:04X} is not allowed in xml", u32::from(*ch))
            }
        }
    }
}

/// Main error type for xmldict
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Error raised while building a document, where no source position exists
    pub fn unparse(kind: ErrorKind) -> Self {
        Self::new(kind, Span::empty())
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for malformed-document errors: bad attributes, mismatched tags
    /// and any other syntax problem found while reading.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MalformedAttribute { .. } | ErrorKind::TagMismatch { .. } | ErrorKind::Syntax
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "error at {}: {}", self.span.start, self.message)
        }
    }
}

/// Result type alias for xmldict
pub type Result<T> = std::result::Result<T, Error>;
