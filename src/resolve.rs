//! Composition, relativization and path navigation.
//!
//! All operations mutate the receiver and only read the base. Preconditions
//! are checked before anything is changed.

use crate::error::{ResolveError, UriError};
use crate::path_trail::{PathTrail, starts_with};
use crate::reference::{UriReference, root_under_host};
use crate::scheme::Scheme;

fn scheme_str<R: UriReference>(uri: &R) -> Option<&str> {
    uri.scheme().map(Scheme::as_str)
}

fn same_authority<R: UriReference>(a: &R, b: &R) -> bool {
    a.host() == b.host() && a.port() == b.port() && a.user() == b.user() && a.pass() == b.pass()
}

fn adopt_authority<R: UriReference>(uri: &mut R, from: &R) -> Result<(), UriError> {
    uri.set_host(from.host())?
        .set_port(from.port())?
        .set_user(from.user())?
        .set_pass(from.pass())?;
    Ok(())
}

fn require_rooted_base<R: UriReference>(base: &R) -> Result<(), UriError> {
    if base.is_rooted() {
        return Ok(());
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(base = base.to_uri_string(), "base is not rooted");
    Err(ResolveError::BaseNotRooted {
        base: base.to_uri_string().to_string(),
    }
    .into())
}

/// Prefixes a relative path with the directory of `base`.
fn join_directory<R: UriReference>(base: &R, relative: &PathTrail) -> PathTrail {
    let mut segments = base.directory_trail().to_vec();
    segments.extend_from_slice(relative.segments());
    PathTrail::from_parts(
        segments,
        base.is_path_rooted(),
        relative.has_trailing_slash(),
    )
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(base = base.to_uri_string()))
)]
pub(crate) fn compose_with_base<R: UriReference>(uri: &mut R, base: &R) -> Result<(), UriError> {
    require_rooted_base(base)?;

    let was_rooted = uri.is_rooted();
    let was_qualified = uri.is_qualified();

    if uri.scheme().is_some_and(|s| !s.is_empty()) {
        return Ok(());
    }
    if uri.has_scheme() || !uri.has_host() {
        uri.set_scheme(scheme_str(base))?;
    }
    if was_qualified {
        return Ok(());
    }

    if !was_rooted && !uri.has_path() && !uri.has_query_string() {
        uri.adopt_query(base)?;
        if !uri.has_fragment() {
            uri.set_fragment(base.fragment())?;
        }
    }
    if !was_rooted {
        let trail = if uri.has_path() {
            join_directory(base, uri.path_trail())
        } else {
            base.path_trail().clone()
        };
        *uri.path_trail_mut() = trail;
    }
    adopt_authority(uri, base)?;
    root_under_host(uri);

    #[cfg(feature = "tracing")]
    tracing::trace!(result = uri.to_uri_string(), "composed");
    Ok(())
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(relative = relative.to_uri_string()))
)]
pub(crate) fn apply_relative<R: UriReference>(uri: &mut R, relative: &R) -> Result<(), UriError> {
    let scheme_given = relative.scheme().is_some_and(|s| !s.is_empty());
    if scheme_given {
        uri.set_scheme(scheme_str(relative))?;
    }

    let path_changed = if scheme_given || relative.has_host() {
        adopt_authority(uri, relative)?;
        *uri.path_trail_mut() = relative.path_trail().clone();
        true
    } else if relative.is_path_rooted() {
        *uri.path_trail_mut() = relative.path_trail().clone();
        true
    } else if relative.has_path() {
        let trail = join_directory(uri, relative.path_trail());
        *uri.path_trail_mut() = trail;
        true
    } else {
        false
    };
    root_under_host(uri);

    let query_copied = path_changed || relative.has_query_string();
    if query_copied {
        uri.adopt_query(relative)?;
    }
    if query_copied || relative.has_fragment() {
        uri.set_fragment(relative.fragment())?;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(result = uri.to_uri_string(), "applied relative reference");
    Ok(())
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(base = base.to_uri_string()))
)]
pub(crate) fn make_relative_to_base<R: UriReference>(uri: &mut R, base: &R) -> Result<(), UriError> {
    require_rooted_base(base)?;
    if !uri.is_rooted() {
        #[cfg(feature = "tracing")]
        tracing::debug!(target_uri = uri.to_uri_string(), "target is not rooted");
        return Err(ResolveError::TargetNotRooted {
            target: uri.to_uri_string().to_string(),
        }
        .into());
    }

    if !same_authority(uri, base) {
        if uri.scheme() == base.scheme() {
            uri.set_scheme(Some(""))?;
        }
        return Ok(());
    }

    let base_directory = base.directory_trail();
    let target_directory = uri.directory_trail();
    // A relative trail starting with an empty segment would render rooted.
    let inside = starts_with(target_directory, base_directory)
        && !target_directory
            .get(base_directory.len())
            .is_some_and(String::is_empty);
    // Without the authority, `//seg` would read back as a host.
    let leading_empty = uri.path_segments().first().is_some_and(String::is_empty);
    if !inside && (!uri.is_path_rooted() || (leading_empty && uri.has_host())) {
        // An authority with an empty path has no shorter spelling.
        if uri.scheme() == base.scheme() {
            uri.set_scheme(Some(""))?;
        }
        return Ok(());
    }

    uri.set_scheme(None)?;
    adopt_authority(uri, &R::default())?;

    if inside {
        let mut relative = uri.directory_trail()[base_directory.len()..].to_vec();
        let document = uri.document();
        if !document.is_empty() && (!relative.is_empty() || document != base.document()) {
            relative.push(document.to_string());
        }

        if relative.is_empty() {
            uri.set_path_trail(Vec::new());
            if uri.query_string() == base.query_string() {
                uri.set_query_string(None)?;
                if uri.fragment() == base.fragment() {
                    uri.set_fragment(None)?;
                } else if !uri.has_fragment() && base.has_fragment() {
                    uri.set_fragment(Some(""))?;
                }
            } else if !uri.has_query_string() && base.has_query_string() {
                uri.set_query_string(Some(""))?;
            }
        } else {
            if uri.has_trailing_slash() {
                relative.push(String::new());
            }
            uri.set_path_trail(relative);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(result = uri.to_uri_string(), "relativized");
    Ok(())
}

pub(crate) fn descend<R: UriReference>(uri: &mut R, path: &str) -> Result<(), UriError> {
    let keep = uri.directory_trail().len();
    uri.path_trail_mut().descend(keep, path);
    root_under_host(uri);
    uri.set_query_string(None)?.set_fragment(None)?;
    Ok(())
}

pub(crate) fn ascend<R: UriReference>(uri: &mut R, levels: usize) -> Result<(), UriError> {
    uri.path_trail_mut().ascend(levels)?;
    uri.set_query_string(None)?.set_fragment(None)?;
    Ok(())
}
