//! Builds URI values from strings.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::error::UriError;
use crate::path_trail::PathTrail;
use crate::reference::UriReference;
use crate::split::split;

fn decode(input: &str) -> Cow<'_, str> {
    percent_decode_str(input).decode_utf8_lossy()
}

/// Splits a raw path into segments, then decodes each one.
///
/// Decoding after the split keeps an encoded `%2F` inside its segment.
pub(crate) fn decode_path(raw: &str) -> PathTrail {
    let mut trail = PathTrail::parse(raw);
    trail.map_segments(|segment| decode(segment).into_owned());
    trail
}

pub(crate) fn parse<R: UriReference>(input: &str) -> Result<R, UriError> {
    let (scheme_relative, rest) = match input.strip_prefix(':') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let parts = split(rest)?;

    #[cfg(feature = "tracing")]
    if parts.scheme.is_none() && !scheme_relative && parts.path.contains(':') {
        tracing::debug!(input, "leading token is not a valid scheme; kept in path");
    }

    let scheme = parts.scheme.or(scheme_relative.then_some(""));
    let mut uri = R::default();
    uri.set_scheme(scheme)?
        .set_host(parts.host.map(decode).as_deref())?
        .set_port(parts.port)?
        .set_user(parts.user.map(decode).as_deref())?
        .set_pass(parts.pass.map(decode).as_deref())?
        .set_query_string(parts.query)?
        .set_fragment(parts.fragment)?;
    *uri.path_trail_mut() = decode_path(parts.path);
    Ok(uri)
}
