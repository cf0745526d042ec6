//! Scheme and authority storage with absent/empty/value presence.

use crate::error::SchemeError;
use crate::scheme::Scheme;

/// Scheme, host, port and credentials of a URI.
///
/// Every field is optional so that "never given" stays distinct from "given
/// but empty". A present, empty scheme is the scheme-relative marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Components {
    scheme: Option<Scheme>,
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    pass: Option<String>,
}

impl Components {
    /// Returns the scheme, if present.
    #[must_use]
    pub const fn scheme(&self) -> Option<&Scheme> {
        self.scheme.as_ref()
    }

    /// Sets or clears the scheme.
    ///
    /// # Errors
    ///
    /// Returns `SchemeError` if a non-empty scheme is malformed. The stored
    /// scheme is left unchanged on failure.
    pub fn set_scheme(&mut self, scheme: Option<&str>) -> Result<(), SchemeError> {
        self.scheme = scheme.map(Scheme::parse).transpose()?;
        Ok(())
    }

    /// Returns the decoded host, if present.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Sets or clears the host.
    pub fn set_host(&mut self, host: Option<&str>) {
        self.host = host.map(str::to_string);
    }

    /// Returns the port, if present.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Sets or clears the port.
    pub fn set_port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    /// Returns the decoded user name, if present.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Sets or clears the user name.
    pub fn set_user(&mut self, user: Option<&str>) {
        self.user = user.map(str::to_string);
    }

    /// Returns the decoded password, if present.
    #[must_use]
    pub fn pass(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    /// Sets or clears the password.
    pub fn set_pass(&mut self, pass: Option<&str>) {
        self.pass = pass.map(str::to_string);
    }
}
