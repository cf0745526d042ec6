//! The contract shared by every URI value type.

use std::borrow::Cow;

use crate::error::UriError;
use crate::parser;
use crate::path_trail::{PathTrail, render_directory};
use crate::render::{self, RenderCache};
use crate::resolve;
use crate::scheme::Scheme;

/// A mutable URI reference.
///
/// Implementors provide storage for the components. Every mutator must drop
/// the memoized renderings held in [`UriReference::render_cache`], and
/// [`UriReference::path_trail_mut`] counts as a mutator.
///
/// A non-empty path is rooted whenever a host is present. Setting a host
/// and every path setter keep that true; edits made directly through
/// [`UriReference::path_trail_mut`] do not.
///
/// Setters return `&mut Self` so calls can be chained:
///
/// ```
/// use uri_trail::{Uri, UriReference};
///
/// let mut uri = Uri::parse("http://example.com/a").unwrap();
/// uri.set_port(Some(8080))?.set_fragment(Some("top"))?;
/// assert_eq!(uri.to_uri_string(), "http://example.com:8080/a#top");
/// # Ok::<(), uri_trail::UriError>(())
/// ```
///
/// Absent and empty are different values for the scheme, host, user,
/// password, query and fragment. An empty scheme renders as a bare `:` and
/// marks a scheme-relative reference that takes its scheme from the base it
/// is composed with.
pub trait UriReference: Default + Clone {
    /// Set when the value has no notion of a document: the directory trail
    /// is the whole path and a trailing slash carries no meaning.
    const TRAILING_SLASH_INSENSITIVE: bool = false;

    /// Returns the scheme.
    fn scheme(&self) -> Option<&Scheme>;

    /// Sets the scheme. `Some("")` is the scheme-relative marker.
    ///
    /// # Errors
    ///
    /// Fails if the scheme is malformed or the type cannot carry one.
    fn set_scheme(&mut self, scheme: Option<&str>) -> Result<&mut Self, UriError>;

    /// Returns the decoded host.
    fn host(&self) -> Option<&str>;

    /// Sets the decoded host.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot carry a host.
    fn set_host(&mut self, host: Option<&str>) -> Result<&mut Self, UriError>;

    /// Returns the port.
    fn port(&self) -> Option<u16>;

    /// Sets the port.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot carry a port.
    fn set_port(&mut self, port: Option<u16>) -> Result<&mut Self, UriError>;

    /// Returns the decoded user name.
    fn user(&self) -> Option<&str>;

    /// Sets the decoded user name.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot carry credentials.
    fn set_user(&mut self, user: Option<&str>) -> Result<&mut Self, UriError>;

    /// Returns the decoded password.
    fn pass(&self) -> Option<&str>;

    /// Sets the decoded password.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot carry credentials.
    fn set_pass(&mut self, pass: Option<&str>) -> Result<&mut Self, UriError>;

    /// Returns the path trail.
    fn path_trail(&self) -> &PathTrail;

    /// Returns the path trail for editing.
    fn path_trail_mut(&mut self) -> &mut PathTrail;

    /// Returns the encoded query without the leading `?`.
    fn query_string(&self) -> Option<Cow<'_, str>>;

    /// Sets the query from its encoded form.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot carry a query.
    fn set_query_string(&mut self, query: Option<&str>) -> Result<&mut Self, UriError>;

    /// Returns the fragment without the leading `#`.
    fn fragment(&self) -> Option<&str>;

    /// Sets the fragment.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot carry a fragment.
    fn set_fragment(&mut self, fragment: Option<&str>) -> Result<&mut Self, UriError>;

    /// Returns the memoized renderings.
    fn render_cache(&self) -> &RenderCache;

    /// Copies the query of `other`.
    ///
    /// # Errors
    ///
    /// Fails if the type cannot carry a query.
    fn adopt_query(&mut self, other: &Self) -> Result<&mut Self, UriError> {
        self.set_query_string(other.query_string().as_deref())
    }

    /// Parses a URI reference.
    ///
    /// A leading `:` is stripped and leaves an empty scheme behind, so
    /// `://host/a` is a scheme-relative reference. Host, credentials and
    /// path segments are percent-decoded; query and fragment are kept as
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Parse` if the input cannot be split into
    /// components, or the error of a setter that rejects a component.
    fn parse_reference(input: &str) -> Result<Self, UriError> {
        parser::parse(input)
    }

    // Presence

    /// Returns true if a scheme is present, even an empty one.
    fn has_scheme(&self) -> bool {
        self.scheme().is_some()
    }

    /// Returns true if a host is present, even an empty one.
    fn has_host(&self) -> bool {
        self.host().is_some()
    }

    /// Returns true if a port is present.
    fn has_port(&self) -> bool {
        self.port().is_some()
    }

    /// Returns true if a user name is present.
    fn has_user(&self) -> bool {
        self.user().is_some()
    }

    /// Returns true if a password is present.
    fn has_pass(&self) -> bool {
        self.pass().is_some()
    }

    /// Returns true if a query is present, even an empty one.
    fn has_query_string(&self) -> bool {
        self.query_string().is_some()
    }

    /// Returns true if a fragment is present, even an empty one.
    fn has_fragment(&self) -> bool {
        self.fragment().is_some()
    }

    /// Returns true if the value has a host or a rooted path.
    fn is_rooted(&self) -> bool {
        self.has_host() || self.is_path_rooted()
    }

    /// Returns true if the value has a host or a scheme.
    fn is_qualified(&self) -> bool {
        self.has_host() || self.has_scheme()
    }

    // Path

    /// Returns the decoded path.
    fn path(&self) -> String {
        self.path_trail().to_string()
    }

    /// Replaces the path with a decoded path string.
    fn set_path(&mut self, path: &str) -> &mut Self {
        *self.path_trail_mut() = PathTrail::parse(path);
        root_under_host(self);
        self
    }

    /// Returns the path segments.
    fn path_segments(&self) -> &[String] {
        self.path_trail().segments()
    }

    /// Replaces the path with a relative trail. A final empty segment
    /// becomes a trailing slash. The trail is rooted when a host is present.
    fn set_path_trail(&mut self, segments: Vec<String>) -> &mut Self {
        *self.path_trail_mut() = PathTrail::relative(segments);
        root_under_host(self);
        self
    }

    /// Returns true if the path is not empty.
    fn has_path(&self) -> bool {
        self.path_trail().has_path()
    }

    /// Returns true if the path starts with `/`.
    fn is_path_rooted(&self) -> bool {
        self.path_trail().is_rooted()
    }

    /// Returns true if the path ends with `/`.
    fn has_trailing_slash(&self) -> bool {
        self.path_trail().has_trailing_slash()
    }

    /// Returns the number of path segments.
    fn path_depth(&self) -> usize {
        self.path_trail().depth()
    }

    /// Returns the segments of the directory part of the path.
    fn directory_trail(&self) -> &[String] {
        if Self::TRAILING_SLASH_INSENSITIVE {
            self.path_trail().segments()
        } else {
            self.path_trail().directory_trail()
        }
    }

    /// Returns the directory, ending in `/` unless it is empty.
    fn directory(&self) -> String {
        render_directory(self.is_path_rooted(), self.directory_trail())
    }

    /// Returns true if the directory is not empty.
    fn has_directory(&self) -> bool {
        if Self::TRAILING_SLASH_INSENSITIVE {
            self.has_path()
        } else {
            self.path_trail().has_directory()
        }
    }

    /// Replaces the directory, keeping the document.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Path` if `directory` does not end in `/`.
    fn set_directory(&mut self, directory: &str) -> Result<&mut Self, UriError> {
        self.path_trail_mut().set_directory(directory)?;
        root_under_host(self);
        Ok(self)
    }

    /// Returns the last segment when the path names a document.
    fn document(&self) -> &str {
        if Self::TRAILING_SLASH_INSENSITIVE {
            ""
        } else {
            self.path_trail().document()
        }
    }

    /// Returns true if the path names a document.
    fn has_document(&self) -> bool {
        !self.document().is_empty()
    }

    /// Replaces the document, keeping the directory.
    fn set_document(&mut self, document: &str) -> &mut Self {
        if Self::TRAILING_SLASH_INSENSITIVE {
            if !document.is_empty() {
                let depth = self.path_depth();
                self.path_trail_mut().descend(depth, document);
            }
        } else {
            self.path_trail_mut().set_document(document);
        }
        root_under_host(self);
        self
    }

    // Rendering

    /// Returns the full URI string.
    fn to_uri_string(&self) -> &str {
        self.render_cache().full(|| render::render(self, true))
    }

    /// Returns the URI string without query and fragment.
    fn uri_string_without_query_fragment(&self) -> &str {
        self.render_cache()
            .without_query_fragment(|| render::render(self, false))
    }

    // Resolution

    /// Resolves this reference against `base` in place.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Resolve` if `base` is not rooted.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_trail::{Uri, UriReference};
    ///
    /// let base = Uri::parse("scheme://host/root/?query#fragment").unwrap();
    /// let mut uri = Uri::parse("a").unwrap();
    /// uri.compose_with_base(&base).unwrap();
    /// assert_eq!(uri.to_uri_string(), "scheme://host/root/a");
    /// ```
    fn compose_with_base(&mut self, base: &Self) -> Result<&mut Self, UriError> {
        resolve::compose_with_base(self, base)?;
        Ok(self)
    }

    /// Resolves `relative` against this value in place.
    ///
    /// # Errors
    ///
    /// Fails only if the type cannot carry a component of `relative`.
    fn apply_relative(&mut self, relative: &Self) -> Result<&mut Self, UriError> {
        resolve::apply_relative(self, relative)?;
        Ok(self)
    }

    /// Rewrites this value as the shortest reference that resolves back to
    /// it against `base`.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Resolve` if `base` or this value is not rooted.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_trail::{Uri, UriReference};
    ///
    /// let base = Uri::parse("scheme://host/a/b?query#fragment").unwrap();
    /// let mut uri = Uri::parse("scheme://host/a/c?query#fragment").unwrap();
    /// uri.make_relative_to_base(&base).unwrap();
    /// assert_eq!(uri.to_uri_string(), "c?query#fragment");
    /// ```
    fn make_relative_to_base(&mut self, base: &Self) -> Result<&mut Self, UriError> {
        resolve::make_relative_to_base(self, base)?;
        Ok(self)
    }

    /// Replaces the document with `path`, which may hold several segments,
    /// and clears query and fragment.
    ///
    /// # Errors
    ///
    /// Never fails for types that can carry a query and fragment.
    fn descend(&mut self, path: &str) -> Result<&mut Self, UriError> {
        resolve::descend(self, path)?;
        Ok(self)
    }

    /// Drops the last `levels` path segments, leaving a directory, and
    /// clears query and fragment.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Path` if `levels` is zero or exceeds the path depth.
    fn ascend(&mut self, levels: usize) -> Result<&mut Self, UriError> {
        resolve::ascend(self, levels)?;
        Ok(self)
    }
}

/// Roots a non-empty path under a host, since `//host` followed by a
/// relative path reads back as rooted.
pub(crate) fn root_under_host<R: UriReference + ?Sized>(uri: &mut R) {
    if uri.has_host() && uri.path_depth() > 0 && !uri.is_path_rooted() {
        uri.path_trail_mut().set_rooted(true);
    }
}
