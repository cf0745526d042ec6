//! Serializer and its memoized output.

use std::cell::OnceCell;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use percent_encoding::utf8_percent_encode;

use crate::constants::{AUTHORITY_PREFIX, HOST, PATH_SEPARATOR, SEGMENT};
use crate::reference::UriReference;

/// Memoized string forms of a URI value.
///
/// Both renderings are computed on first read and dropped by every mutation.
/// The cache never takes part in equality or hashing.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    full: OnceCell<String>,
    without_query_fragment: OnceCell<String>,
}

impl RenderCache {
    pub(crate) fn invalidate(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn full<F: FnOnce() -> String>(&self, render: F) -> &str {
        self.full.get_or_init(render)
    }

    pub(crate) fn without_query_fragment<F: FnOnce() -> String>(&self, render: F) -> &str {
        self.without_query_fragment.get_or_init(render)
    }

    #[cfg(test)]
    pub(crate) fn is_warm(&self) -> bool {
        self.full.get().is_some() || self.without_query_fragment.get().is_some()
    }
}

impl PartialEq for RenderCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for RenderCache {}

impl Hash for RenderCache {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

pub(crate) fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Renders `uri`, optionally leaving out query and fragment.
pub(crate) fn render<R: UriReference + ?Sized>(uri: &R, with_query_fragment: bool) -> String {
    let mut out = String::new();

    if let Some(scheme) = uri.scheme() {
        out.push_str(scheme.as_str());
        out.push(':');
    }

    let trail = uri.path_trail();
    if let Some(host) = uri.host() {
        out.push_str(AUTHORITY_PREFIX);
        if let Some(user) = uri.user() {
            out.push_str(&encode_segment(user));
            if let Some(pass) = uri.pass() {
                out.push(':');
                out.push_str(&encode_segment(pass));
            }
            out.push('@');
        }
        out.extend(utf8_percent_encode(host, HOST));
        if let Some(port) = uri.port() {
            let _ = write!(out, ":{port}");
        }
        if trail.has_path() && !trail.is_rooted() {
            out.push(PATH_SEPARATOR);
        }
    }

    out.push_str(&trail.render_with(encode_segment));

    if with_query_fragment {
        if let Some(query) = uri.query_string() {
            out.push('?');
            out.push_str(&query);
        }
        if let Some(fragment) = uri.fragment() {
            out.push('#');
            out.push_str(fragment);
        }
    }
    out
}
