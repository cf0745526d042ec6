//! Filesystem paths as URI references.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::PATH_SEPARATOR;
use crate::error::UriError;
use crate::parser;
use crate::path_trail::PathTrail;
use crate::query::QueryModel;
use crate::reference::UriReference;
use crate::render::RenderCache;
use crate::scheme::Scheme;
use crate::uri::Uri;

/// A URI reference that is only a path.
///
/// Scheme, authority, query and fragment are always absent; setting any of
/// them to a value fails with `UriError::Unsupported`. A local path has no
/// document: its directory is the whole path, so `/a/b` and `/a/b/` compose
/// and relativize the same way.
///
/// # Examples
///
/// ```
/// use uri_trail::{LocalPath, UriReference};
///
/// let base = LocalPath::parse("/srv/www").unwrap();
/// let mut path = LocalPath::parse("assets/app.js").unwrap();
/// path.compose_with_base(&base).unwrap();
/// assert_eq!(path.unix_path(), "/srv/www/assets/app.js");
///
/// assert!(path.set_host(Some("example.com")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalPath {
    path: PathTrail,
    cache: RenderCache,
}

fn reject<T>(component: &'static str, value: Option<T>) -> Result<(), UriError> {
    match value {
        Some(_) => Err(UriError::Unsupported { component }),
        None => Ok(()),
    }
}

impl LocalPath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a percent-encoded path.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Parse` for unsplittable input and
    /// `UriError::Unsupported` if the input has a scheme, authority, query
    /// or fragment.
    pub fn parse(input: &str) -> Result<Self, UriError> {
        parser::parse(input)
    }

    /// Returns the rendered, percent-encoded path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.to_uri_string()
    }

    /// Returns the decoded path without a trailing slash.
    #[must_use]
    pub fn unix_path(&self) -> String {
        let joined = self.path.segments().join(&PATH_SEPARATOR.to_string());
        if self.path.is_rooted() {
            format!("{PATH_SEPARATOR}{joined}")
        } else {
            joined
        }
    }

    /// Returns the decoded path as a `PathBuf`.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.unix_path())
    }
}

impl UriReference for LocalPath {
    const TRAILING_SLASH_INSENSITIVE: bool = true;

    fn scheme(&self) -> Option<&Scheme> {
        None
    }

    fn set_scheme(&mut self, scheme: Option<&str>) -> Result<&mut Self, UriError> {
        reject("scheme", scheme)?;
        Ok(self)
    }

    fn host(&self) -> Option<&str> {
        None
    }

    fn set_host(&mut self, host: Option<&str>) -> Result<&mut Self, UriError> {
        reject("host", host)?;
        Ok(self)
    }

    fn port(&self) -> Option<u16> {
        None
    }

    fn set_port(&mut self, port: Option<u16>) -> Result<&mut Self, UriError> {
        reject("port", port)?;
        Ok(self)
    }

    fn user(&self) -> Option<&str> {
        None
    }

    fn set_user(&mut self, user: Option<&str>) -> Result<&mut Self, UriError> {
        reject("user", user)?;
        Ok(self)
    }

    fn pass(&self) -> Option<&str> {
        None
    }

    fn set_pass(&mut self, pass: Option<&str>) -> Result<&mut Self, UriError> {
        reject("password", pass)?;
        Ok(self)
    }

    fn path_trail(&self) -> &PathTrail {
        &self.path
    }

    fn path_trail_mut(&mut self) -> &mut PathTrail {
        self.cache.invalidate();
        &mut self.path
    }

    fn query_string(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn set_query_string(&mut self, query: Option<&str>) -> Result<&mut Self, UriError> {
        reject("query", query)?;
        Ok(self)
    }

    fn fragment(&self) -> Option<&str> {
        None
    }

    fn set_fragment(&mut self, fragment: Option<&str>) -> Result<&mut Self, UriError> {
        reject("fragment", fragment)?;
        Ok(self)
    }

    fn render_cache(&self) -> &RenderCache {
        &self.cache
    }
}

impl<Q: QueryModel> TryFrom<&Uri<Q>> for LocalPath {
    type Error = UriError;

    fn try_from(uri: &Uri<Q>) -> Result<Self, Self::Error> {
        let mut local = Self::new();
        local
            .set_scheme(uri.scheme().map(Scheme::as_str))?
            .set_host(uri.host())?
            .set_port(uri.port())?
            .set_user(uri.user())?
            .set_pass(uri.pass())?
            .set_query_string(uri.query_string().as_deref())?
            .set_fragment(uri.fragment())?;
        local.path = uri.path_trail().clone();
        Ok(local)
    }
}

impl fmt::Display for LocalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_uri_string())
    }
}

impl FromStr for LocalPath {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for LocalPath {
    type Error = UriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for LocalPath {
    fn as_ref(&self) -> &str {
        self.to_uri_string()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LocalPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_uri_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LocalPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
