//! Error types for query encoding and decoding.

use thiserror::Error;
use viewstate_model::ModelError;

/// Errors raised while encoding, decoding or configuring a view query.
///
/// Decoding is all-or-nothing: any of these aborts the whole parse and no
/// partial state is returned. Positions are byte offsets into the token.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Input does not start with `name(`.
    #[error("invalid section header at byte {position}")]
    InvalidSectionHeader { position: usize },

    /// Header name is not one of the known sections.
    #[error("unknown section '{name}' at byte {position}")]
    UnknownSection { name: String, position: usize },

    /// A section body was not closed by `)`.
    #[error("section '{section}' is not terminated at byte {position}")]
    UnterminatedSection {
        section: &'static str,
        position: usize,
    },

    /// `pos(...)` body is not `digits,digits`.
    #[error("page section must be 'offset,limit' at byte {position}")]
    BadPageSection { position: usize },

    /// A value the primitive codec cannot represent.
    #[error("cannot serialize {kind} value without a custom filter codec")]
    UnsupportedType { kind: &'static str },

    /// A separator was missing inside a section body.
    #[error("expected '{expected}' at byte {position}, found {found}")]
    UnexpectedCharacter {
        expected: char,
        found: String,
        position: usize,
    },

    /// A parenthesis-wrapped payload has no header or no terminator.
    #[error("unbalanced parenthesis encoding at byte {position}")]
    UnbalancedParens { position: usize },

    /// Percent-decoding produced invalid UTF-8.
    #[error("invalid percent-encoding: {message}")]
    InvalidEncoding { message: String },

    /// A field carried a sort direction other than asc, desc or none.
    #[error("invalid sort direction for field '{field}': {source}")]
    InvalidSorting {
        field: String,
        #[source]
        source: ModelError,
    },

    /// A filter codec rejected a value.
    #[error("invalid filter value: {message}")]
    InvalidFilterValue { message: String },

    /// Encoding or decoding one filter failed.
    #[error("filter '{id}': {source}")]
    Filter {
        id: String,
        #[source]
        source: Box<QueryError>,
    },

    /// Invalid view definition.
    #[error("invalid view definition: {message}")]
    Config { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

impl QueryError {
    /// Create an UnexpectedCharacter error.
    pub fn unexpected(expected: char, found: Option<char>, position: usize) -> Self {
        Self::UnexpectedCharacter {
            expected,
            found: found.map_or_else(|| "end of input".to_string(), |c| format!("'{c}'")),
            position,
        }
    }

    /// Create an InvalidFilterValue error.
    pub fn invalid_filter_value(message: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            message: message.into(),
        }
    }

    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wrap an error raised by the codec of filter `id`.
    pub fn in_filter(self, id: impl Into<String>) -> Self {
        Self::Filter {
            id: id.into(),
            source: Box::new(self),
        }
    }

    /// Re-base byte positions reported against a slice starting at `base`.
    #[must_use]
    pub fn shifted(self, base: usize) -> Self {
        match self {
            Self::InvalidSectionHeader { position } => Self::InvalidSectionHeader {
                position: position + base,
            },
            Self::UnknownSection { name, position } => Self::UnknownSection {
                name,
                position: position + base,
            },
            Self::UnterminatedSection { section, position } => Self::UnterminatedSection {
                section,
                position: position + base,
            },
            Self::BadPageSection { position } => Self::BadPageSection {
                position: position + base,
            },
            Self::UnexpectedCharacter {
                expected,
                found,
                position,
            } => Self::UnexpectedCharacter {
                expected,
                found,
                position: position + base,
            },
            Self::UnbalancedParens { position } => Self::UnbalancedParens {
                position: position + base,
            },
            Self::Filter { id, source } => Self::Filter {
                id,
                source: Box::new(source.shifted(base)),
            },
            other => other,
        }
    }
}
