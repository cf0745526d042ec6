//! Error types for URI parsing, mutation and resolution.

use std::fmt;

/// Broad classes of failure, independent of which component raised them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A setter or operation received a value it cannot accept.
    InvalidArgument,
    /// An operation was called on values that do not satisfy its precondition.
    PreconditionFailed,
    /// A count exceeded what the value can provide.
    Range,
    /// The input string could not be segmented as a URI.
    ParseFailure,
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// Parsing a URI string failed
    Parse(ParseError),
    /// Scheme validation failed
    Scheme(SchemeError),
    /// A path operation failed
    Path(PathError),
    /// A structured query could not be accepted
    Query(QueryError),
    /// Composition or relativization preconditions were not met
    Resolve(ResolveError),
    /// The value type cannot carry this component
    Unsupported {
        /// Name of the rejected component
        component: &'static str,
    },
}

impl UriError {
    /// Returns the broad class of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::ParseFailure,
            Self::Scheme(_) | Self::Query(_) | Self::Unsupported { .. } => {
                ErrorCategory::InvalidArgument
            }
            Self::Path(PathError::AscendTooFar { .. }) => ErrorCategory::Range,
            Self::Path(_) => ErrorCategory::InvalidArgument,
            Self::Resolve(_) => ErrorCategory::PreconditionFailed,
        }
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Scheme(e) => write!(f, "invalid scheme: {e}"),
            Self::Path(e) => write!(f, "{e}"),
            Self::Query(e) => write!(f, "invalid query: {e}"),
            Self::Resolve(e) => write!(f, "{e}"),
            Self::Unsupported { component } => {
                write!(f, "this URI type cannot have a {component}")
            }
        }
    }
}

impl std::error::Error for UriError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Scheme(e) => Some(e),
            Self::Path(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::Resolve(e) => Some(e),
            Self::Unsupported { .. } => None,
        }
    }
}

impl From<ParseError> for UriError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<SchemeError> for UriError {
    fn from(e: SchemeError) -> Self {
        Self::Scheme(e)
    }
}

impl From<PathError> for UriError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

impl From<QueryError> for UriError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

impl From<ResolveError> for UriError {
    fn from(e: ResolveError) -> Self {
        Self::Resolve(e)
    }
}

/// Errors that can occur when splitting a URI string into components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Control character in the input
    UnexpectedChar {
        /// The unexpected character
        char: char,
        /// Byte position in the input
        position: usize,
    },
    /// Port is not a number in `0..=65535`
    InvalidPort {
        /// The rejected port text
        value: String,
    },
    /// Userinfo or port given without a host
    MissingHost,
    /// IP literal host is malformed
    InvalidIpLiteral {
        /// The rejected host text
        value: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::UnexpectedChar { char, position } => {
                write!(f, "unexpected character {char:?} at position {position}")
            }
            ParseErrorKind::InvalidPort { value } => {
                write!(f, "invalid port '{value}'; expected a number up to 65535")
            }
            ParseErrorKind::MissingHost => {
                write!(f, "authority has userinfo or port but no host")
            }
            ParseErrorKind::InvalidIpLiteral { value } => {
                write!(f, "malformed IP literal '{value}'")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors for scheme validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    /// Scheme must start with an ASCII letter
    MustStartWithLetter {
        /// The character found
        found: char,
    },
    /// Invalid character after the first position
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MustStartWithLetter { found } => {
                write!(f, "scheme must start with a letter, found '{found}'")
            }
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; only letters, digits, '+', '-' and '.' allowed"
                )
            }
        }
    }
}

impl std::error::Error for SchemeError {}

/// Errors for path trail operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Directory passed to `set_directory` does not end in '/'
    DirectoryWithoutSlash {
        /// The rejected directory
        directory: String,
    },
    /// `ascend` was asked to climb zero levels
    InvalidAscendLevels,
    /// `ascend` was asked to climb more levels than the path has
    AscendTooFar {
        /// Requested levels
        levels: usize,
        /// Segments available
        depth: usize,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryWithoutSlash { directory } => {
                write!(f, "directory '{directory}' must end in '/'")
            }
            Self::InvalidAscendLevels => write!(f, "levels to ascend must be at least 1"),
            Self::AscendTooFar { levels, depth } => {
                write!(f, "cannot ascend {levels} levels from a path of depth {depth}")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Errors for structured query mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The mapping holds a null value, which form encoding cannot represent
    NullValue {
        /// Bracketed key path of the null value, e.g. `b[y]`
        key: String,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullValue { key } => write!(
                f,
                "query value at '{key}' is null; convert nulls with nulls_to_empty or drop them with without_nulls"
            ),
        }
    }
}

impl std::error::Error for QueryError {}

/// Errors for composition and relativization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The base has neither scheme, host nor rooted path
    BaseNotRooted {
        /// The rejected base
        base: String,
    },
    /// Only rooted URIs can be made relative
    TargetNotRooted {
        /// The rejected receiver
        target: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseNotRooted { base } => {
                write!(f, "base '{base}' must be a rooted URI")
            }
            Self::TargetNotRooted { target } => {
                write!(f, "only rooted URIs can be made relative, got '{target}'")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        let range = UriError::from(PathError::AscendTooFar { levels: 2, depth: 1 });
        assert_eq!(range.category(), ErrorCategory::Range);

        let levels = UriError::from(PathError::InvalidAscendLevels);
        assert_eq!(levels.category(), ErrorCategory::InvalidArgument);

        let base = UriError::from(ResolveError::BaseNotRooted { base: "a".into() });
        assert_eq!(base.category(), ErrorCategory::PreconditionFailed);

        let parse = UriError::from(ParseError {
            input: "//h:x".into(),
            kind: ParseErrorKind::InvalidPort { value: "x".into() },
        });
        assert_eq!(parse.category(), ErrorCategory::ParseFailure);

        let unsupported = UriError::Unsupported { component: "host" };
        assert_eq!(unsupported.category(), ErrorCategory::InvalidArgument);
    }

    #[test]
    fn display_includes_context() {
        let err = UriError::from(PathError::DirectoryWithoutSlash {
            directory: "/a".into(),
        });
        assert_eq!(err.to_string(), "directory '/a' must end in '/'");

        let err = UriError::from(QueryError::NullValue { key: "b[y]".into() });
        assert!(err.to_string().contains("b[y]"));
    }

    #[test]
    fn source_exposes_inner_error() {
        use std::error::Error;

        let err = UriError::from(SchemeError::MustStartWithLetter { found: '/' });
        assert!(err.source().is_some());
        assert!(UriError::Unsupported { component: "port" }.source().is_none());
    }
}
