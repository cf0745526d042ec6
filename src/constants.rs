//! Constants shared by the parser, the renderer and the form codec.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Prefix introducing the authority component.
pub const AUTHORITY_PREFIX: &str = "//";

/// Characters left alone when encoding a path segment, user or password.
///
/// Only ALPHA, DIGIT and `-` `_` `.` `~` pass through, everything else is
/// percent-encoded.
pub const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Characters left alone when encoding a host.
///
/// Same as [`SEGMENT`] but keeps the brackets and colons of IP literals.
pub const HOST: &AsciiSet = &SEGMENT.remove(b'[').remove(b']').remove(b':');

/// Characters left alone when form-encoding query keys and values.
///
/// Space is handled separately and becomes `+`.
pub const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');
