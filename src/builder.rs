//! Builder for constructing URI values from explicit components.

use crate::error::UriError;
use crate::form::{self, QueryMap};
use crate::query::{FormQuery, QueryModel};
use crate::reference::UriReference;
use crate::uri::{FormUri, Uri};

/// Builds a [`Uri`] from decoded component values.
///
/// Components that are never set stay absent. Validation happens in
/// [`UriBuilder::build`], so a malformed scheme or a query mapping holding a
/// `Null` is reported there.
///
/// # Examples
///
/// ```
/// use uri_trail::{Uri, UriBuilder, UriReference};
///
/// let uri: Uri = UriBuilder::new()
///     .scheme("https")
///     .host("example.com")
///     .port(8443)
///     .path("/a b/")
///     .query("x=1")
///     .build()
///     .unwrap();
///
/// assert_eq!(uri.as_str(), "https://example.com:8443/a%20b/?x=1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct UriBuilder {
    scheme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    pass: Option<String>,
    path: Option<String>,
    query: Option<String>,
    form_query: Option<QueryMap>,
    fragment: Option<String>,
}

impl UriBuilder {
    /// Creates a builder with every component absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheme. An empty scheme makes a scheme-relative reference.
    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the decoded host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the decoded user name.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the decoded password.
    #[must_use]
    pub fn pass(mut self, pass: impl Into<String>) -> Self {
        self.pass = Some(pass.into());
        self
    }

    /// Sets the decoded path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the encoded query string, replacing any mapping.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self.form_query = None;
        self
    }

    /// Sets the query as a mapping, replacing any query string.
    #[must_use]
    pub fn form_query(mut self, map: QueryMap) -> Self {
        self.form_query = Some(map);
        self.query = None;
        self
    }

    /// Sets the fragment.
    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Sets the port if `Some`, clears it if `None`.
    #[must_use]
    pub const fn maybe_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Sets the query string if `Some`, clears the query if `None`.
    #[must_use]
    pub fn maybe_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self.form_query = None;
        self
    }

    /// Sets the fragment if `Some`, clears it if `None`.
    #[must_use]
    pub fn maybe_fragment(mut self, fragment: Option<String>) -> Self {
        self.fragment = fragment;
        self
    }

    /// Builds a URI with the query model `Q`.
    ///
    /// # Errors
    ///
    /// Returns `UriError::Scheme` for a malformed scheme and
    /// `UriError::Query` for a query mapping holding a `Null`.
    pub fn build<Q: QueryModel>(self) -> Result<Uri<Q>, UriError> {
        let encoded = self.form_query.as_ref().map(form::encode).transpose()?;
        let query = encoded.as_deref().or(self.query.as_deref());

        let mut uri = Uri::<Q>::default();
        uri.set_scheme(self.scheme.as_deref())?
            .set_host(self.host.as_deref())?
            .set_port(self.port)?
            .set_user(self.user.as_deref())?
            .set_pass(self.pass.as_deref())?
            .set_query_string(query)?
            .set_fragment(self.fragment.as_deref())?;
        if let Some(path) = &self.path {
            uri.set_path(path);
        }
        Ok(uri)
    }

    /// Builds a [`FormUri`], keeping a mapping given to
    /// [`UriBuilder::form_query`] as is.
    ///
    /// # Errors
    ///
    /// Same as [`UriBuilder::build`].
    pub fn build_form(mut self) -> Result<FormUri, UriError> {
        let map = self.form_query.take();
        let mut uri = self.build::<FormQuery>()?;
        if map.is_some() {
            uri.set_query(map)?;
        }
        Ok(uri)
    }
}
