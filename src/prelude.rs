//! Convenient re-exports for glob imports.
//!
//! Brings the value types and the [`UriReference`] trait, whose methods they
//! all rely on, into scope at once:
//!
//! ```rust
//! use uri_trail::prelude::*;
//!
//! let mut uri = Uri::parse("scheme://host/a/").unwrap();
//! uri.descend("b").unwrap();
//! assert_eq!(uri.as_str(), "scheme://host/a/b");
//! ```

pub use crate::{
    // Core types
    Components, FormQuery, FormUri, LocalPath, OpaqueQuery, PathTrail, QueryMap, QueryModel,
    QueryValue, Scheme, Uri, UriReference,
    // Builder
    UriBuilder,
    // Errors
    ErrorCategory, ParseError, ParseErrorKind, PathError, QueryError, ResolveError, SchemeError,
    UriError,
};
