//! The general URI value.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::components::Components;
use crate::error::{QueryError, UriError};
use crate::form::{self, QueryMap, QueryValue};
use crate::local_path::LocalPath;
use crate::parser;
use crate::path_trail::PathTrail;
use crate::query::{FormQuery, OpaqueQuery, QueryModel};
use crate::reference::{UriReference, root_under_host};
use crate::render::RenderCache;
use crate::scheme::Scheme;

/// A mutable URI reference with scheme, authority, path, query and fragment.
///
/// The query is stored by the model `Q`: [`OpaqueQuery`] keeps it as given,
/// [`FormQuery`] decodes it into a mapping (see [`FormUri`]).
///
/// Every accessor and mutator comes from [`UriReference`], so the trait must
/// be in scope.
///
/// # Examples
///
/// ```
/// use uri_trail::{Uri, UriReference};
///
/// let mut uri = Uri::parse("http://user@example.com:8080/docs/index.html?lang=en#intro").unwrap();
/// assert_eq!(uri.scheme().map(|s| s.as_str()), Some("http"));
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.port(), Some(8080));
/// assert_eq!(uri.directory(), "/docs/");
/// assert_eq!(uri.document(), "index.html");
///
/// uri.descend("api/").unwrap();
/// assert_eq!(uri.as_str(), "http://user@example.com:8080/docs/api/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Uri<Q: QueryModel = OpaqueQuery> {
    components: Components,
    path: PathTrail,
    query: Q,
    fragment: Option<String>,
    cache: RenderCache,
}

/// A URI whose query is a nested key/value mapping.
pub type FormUri = Uri<FormQuery>;

impl Uri {
    /// Creates a URI with every component absent. It renders as `""`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URI reference.
    ///
    /// Other query models parse through [`UriReference::parse_reference`]
    /// or [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns `UriError::Parse` if the input cannot be split into
    /// components.
    pub fn parse(input: &str) -> Result<Self, UriError> {
        parser::parse(input)
    }
}

impl<Q: QueryModel> Uri<Q> {
    /// Returns the rendered URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.to_uri_string()
    }

    /// Returns the query model.
    #[must_use]
    pub const fn query_model(&self) -> &Q {
        &self.query
    }

    /// Returns the scheme, host, port and credentials.
    #[must_use]
    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// Re-expresses this value with another query model.
    ///
    /// The query is carried over through its encoded string.
    ///
    /// ```
    /// use uri_trail::{FormUri, Uri, UriReference};
    ///
    /// let uri = Uri::parse("/search?tags[]=a&tags[]=b").unwrap();
    /// let form: FormUri = uri.convert();
    /// assert_eq!(form.as_str(), "/search?tags%5B0%5D=a&tags%5B1%5D=b");
    /// ```
    #[must_use]
    pub fn convert<R: QueryModel>(&self) -> Uri<R> {
        let mut query = R::default();
        query.set_query_string(self.query.query_string().as_deref());
        Uri {
            components: self.components.clone(),
            path: self.path.clone(),
            query,
            fragment: self.fragment.clone(),
            cache: RenderCache::default(),
        }
    }

    fn touched(&mut self) -> &mut Self {
        self.cache.invalidate();
        self
    }
}

impl<Q: QueryModel> UriReference for Uri<Q> {
    fn scheme(&self) -> Option<&Scheme> {
        self.components.scheme()
    }

    fn set_scheme(&mut self, scheme: Option<&str>) -> Result<&mut Self, UriError> {
        self.components.set_scheme(scheme)?;
        Ok(self.touched())
    }

    fn host(&self) -> Option<&str> {
        self.components.host()
    }

    fn set_host(&mut self, host: Option<&str>) -> Result<&mut Self, UriError> {
        self.components.set_host(host);
        root_under_host(self);
        Ok(self.touched())
    }

    fn port(&self) -> Option<u16> {
        self.components.port()
    }

    fn set_port(&mut self, port: Option<u16>) -> Result<&mut Self, UriError> {
        self.components.set_port(port);
        Ok(self.touched())
    }

    fn user(&self) -> Option<&str> {
        self.components.user()
    }

    fn set_user(&mut self, user: Option<&str>) -> Result<&mut Self, UriError> {
        self.components.set_user(user);
        Ok(self.touched())
    }

    fn pass(&self) -> Option<&str> {
        self.components.pass()
    }

    fn set_pass(&mut self, pass: Option<&str>) -> Result<&mut Self, UriError> {
        self.components.set_pass(pass);
        Ok(self.touched())
    }

    fn path_trail(&self) -> &PathTrail {
        &self.path
    }

    fn path_trail_mut(&mut self) -> &mut PathTrail {
        self.cache.invalidate();
        &mut self.path
    }

    fn query_string(&self) -> Option<Cow<'_, str>> {
        self.query.query_string()
    }

    fn set_query_string(&mut self, query: Option<&str>) -> Result<&mut Self, UriError> {
        self.query.set_query_string(query);
        Ok(self.touched())
    }

    fn has_query_string(&self) -> bool {
        self.query.is_present()
    }

    fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    fn set_fragment(&mut self, fragment: Option<&str>) -> Result<&mut Self, UriError> {
        self.fragment = fragment.map(str::to_string);
        Ok(self.touched())
    }

    fn render_cache(&self) -> &RenderCache {
        &self.cache
    }

    fn adopt_query(&mut self, other: &Self) -> Result<&mut Self, UriError> {
        self.query.clone_from(&other.query);
        Ok(self.touched())
    }
}

impl Uri<FormQuery> {
    /// Returns the decoded query mapping.
    #[must_use]
    pub const fn query(&self) -> Option<&QueryMap> {
        self.query.map()
    }

    /// Replaces the query mapping. `Some(empty)` renders as a bare `?`.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Query` if the mapping holds a `Null` anywhere;
    /// clean it first with [`form::nulls_to_empty`] or [`form::without_nulls`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_trail::{FormUri, QueryMap, QueryValue, UriReference};
    ///
    /// let mut uri = FormUri::parse_reference("http://host/").unwrap();
    /// let mut map = QueryMap::new();
    /// map.insert("foo".into(), QueryValue::list(["bar", "baz"]));
    /// uri.set_query(Some(map)).unwrap();
    /// assert_eq!(uri.as_str(), "http://host/?foo%5B0%5D=bar&foo%5B1%5D=baz");
    /// ```
    pub fn set_query(&mut self, map: Option<QueryMap>) -> Result<&mut Self, UriError> {
        self.query.set_map(map)?;
        Ok(self.touched())
    }

    /// Removes the query.
    pub fn clear_query(&mut self) -> &mut Self {
        self.query = FormQuery::default();
        self.touched()
    }

    /// Returns a top-level query parameter.
    #[must_use]
    pub fn query_parameter(&self, key: &str) -> Option<&QueryValue> {
        self.query.map().and_then(|map| map.get(key))
    }

    /// Returns true if the query has the top-level parameter `key`.
    #[must_use]
    pub fn has_query_parameter(&self, key: &str) -> bool {
        self.query_parameter(key).is_some()
    }

    /// Sets a top-level query parameter, creating the query if absent.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Query` if the value is or contains `Null`.
    pub fn set_query_parameter<V>(&mut self, key: &str, value: V) -> Result<&mut Self, UriError>
    where
        V: Into<QueryValue>,
    {
        let value = value.into();
        if let Some(key) = form::null_path(key, &value) {
            return Err(QueryError::NullValue { key }.into());
        }
        self.query.map_mut().insert(key.to_string(), value);
        Ok(self.touched())
    }

    /// Removes a top-level query parameter, keeping the order of the rest.
    /// The query stays present even when it becomes empty.
    pub fn unset_query_parameter(&mut self, key: &str) -> &mut Self {
        if self.query.map().is_some_and(|map| map.contains_key(key)) {
            self.query.map_mut().shift_remove(key);
            self.touched();
        }
        self
    }
}

impl<Q: QueryModel> From<&LocalPath> for Uri<Q> {
    fn from(local: &LocalPath) -> Self {
        Self {
            path: local.path_trail().clone(),
            ..Self::default()
        }
    }
}

impl<Q: QueryModel> fmt::Display for Uri<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_uri_string())
    }
}

impl<Q: QueryModel> FromStr for Uri<Q> {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

impl<Q: QueryModel> TryFrom<&str> for Uri<Q> {
    type Error = UriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parser::parse(s)
    }
}

impl<Q: QueryModel> AsRef<str> for Uri<Q> {
    fn as_ref(&self) -> &str {
        self.to_uri_string()
    }
}

#[cfg(feature = "serde")]
impl<Q: QueryModel> serde::Serialize for Uri<Q> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_uri_string())
    }
}

#[cfg(feature = "serde")]
impl<'de, Q: QueryModel> serde::Deserialize<'de> for Uri<Q> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parser::parse(&s).map_err(serde::de::Error::custom)
    }
}
