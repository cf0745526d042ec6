//! Mutable URI values with path-trail navigation, base composition and
//! relativization.
//!
//! # Overview
//!
//! A URI is parsed into components that can each be absent, empty, or hold a
//! value, and that distinction survives every operation:
//!
//! ```text
//! [scheme:][//[user[:pass]@]host[:port]][/]seg/seg[/][?query][#fragment]
//! ```
//!
//! The path is held as a [`PathTrail`]: decoded segments plus a rooted flag
//! and a trailing-slash flag. The last segment of a path without a trailing
//! slash is its *document*; the rest is its *directory*.
//!
//! # Quick Start
//!
//! ```rust
//! use uri_trail::{Uri, UriReference};
//!
//! let base = Uri::parse("scheme://host/a/b?query#fragment").unwrap();
//!
//! // Resolve a relative reference
//! let mut uri = Uri::parse("c").unwrap();
//! uri.compose_with_base(&base).unwrap();
//! assert_eq!(uri.as_str(), "scheme://host/a/c");
//!
//! // And turn it back into one
//! uri.make_relative_to_base(&base).unwrap();
//! assert_eq!(uri.as_str(), "c");
//! ```
//!
//! # Variants
//!
//! | Type | Query | Components |
//! |------|-------|------------|
//! | [`Uri`] | raw string | all |
//! | [`FormUri`] | nested mapping | all |
//! | [`LocalPath`] | none | path only |
//!
//! All three implement [`UriReference`], which carries the accessors,
//! mutators and the navigation operations.
//!
//! # Scheme-relative references
//!
//! An empty but present scheme renders as a leading `:`. `://host2/a`
//! composed with `scheme://host/` becomes `scheme://host2/a`, whereas
//! `//host2/a` stays without a scheme.
//!
//! # Dot segments
//!
//! `.` and `..` are ordinary segments. Nothing collapses them.
//!
//! # Leading empty segments
//!
//! Without a host, a rooted path whose first segment is empty renders as
//! `//seg`, which reads back as an authority. Such a path only survives a
//! round trip through the string form while a host is present.
//! Relativization keeps the authority in that case.
//!
//! # Features
//!
//! - `serde`: string-form `Serialize`/`Deserialize` for [`Uri`],
//!   [`LocalPath`] and [`Scheme`]
//! - `tracing`: debug and trace events from parsing and resolution

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod components;
mod constants;
mod error;
pub mod form;
mod local_path;
mod parser;
mod path_trail;
pub mod prelude;
mod query;
mod reference;
mod render;
mod resolve;
mod scheme;
mod split;
mod uri;

pub use builder::UriBuilder;
pub use components::Components;
pub use constants::{AUTHORITY_PREFIX, PATH_SEPARATOR};
pub use error::{
    ErrorCategory, ParseError, ParseErrorKind, PathError, QueryError, ResolveError, SchemeError,
    UriError,
};
pub use form::{QueryMap, QueryValue, find_null, nulls_to_empty, without_nulls};
pub use local_path::LocalPath;
pub use path_trail::PathTrail;
pub use query::{FormQuery, OpaqueQuery, QueryModel};
pub use reference::UriReference;
pub use render::RenderCache;
pub use scheme::Scheme;
pub use uri::{FormUri, Uri};
