//! Path trail: segment list plus rooted and trailing-slash flags.

use std::fmt;

use crate::constants::PATH_SEPARATOR;
use crate::error::PathError;

/// The path of a URI, kept as decoded segments.
///
/// A trail records whether the path starts with `/` (rooted) and whether it
/// ends with `/` (it names a directory rather than a document). The last
/// segment of a trail without a trailing slash is its document; the other
/// segments form its directory trail.
///
/// Segments are not normalized: `.` and `..` are ordinary segments. Empty
/// segments are kept too, so a rooted trail starting with one renders as
/// `//seg`; in a URI without a host that text reads back as an authority.
///
/// # Examples
///
/// ```
/// use uri_trail::PathTrail;
///
/// let trail = PathTrail::parse("/a/b/c");
/// assert!(trail.is_rooted());
/// assert_eq!(trail.segments(), ["a", "b", "c"]);
/// assert_eq!(trail.directory_trail(), ["a", "b"]);
/// assert_eq!(trail.document(), "c");
/// assert_eq!(trail.directory(), "/a/b/");
///
/// let dir = PathTrail::parse("a/b/");
/// assert!(dir.has_trailing_slash());
/// assert_eq!(dir.document(), "");
/// assert_eq!(dir.to_string(), "a/b/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathTrail {
    segments: Vec<String>,
    rooted: bool,
    trailing_slash: bool,
}

impl PathTrail {
    /// Creates an empty, unrooted trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a raw path on `/`.
    ///
    /// A leading empty element marks the trail as rooted and a trailing empty
    /// element marks a trailing slash. `""` is the empty trail and `"/"` is a
    /// rooted trail with no segments.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut segments: Vec<String> = raw.split(PATH_SEPARATOR).map(str::to_string).collect();
        let rooted = segments.len() > 1 && segments[0].is_empty();
        if rooted {
            segments.remove(0);
        }
        let mut trail = Self {
            segments: Vec::new(),
            rooted,
            trailing_slash: false,
        };
        trail.assign(segments);
        trail
    }

    /// Builds an unrooted trail from segments.
    ///
    /// A final empty segment is consumed as a trailing slash.
    #[must_use]
    pub fn relative(segments: Vec<String>) -> Self {
        let mut trail = Self::new();
        trail.assign(segments);
        trail
    }

    pub(crate) fn from_parts(segments: Vec<String>, rooted: bool, trailing_slash: bool) -> Self {
        let trailing_slash = trailing_slash && !segments.is_empty();
        Self {
            segments,
            rooted,
            trailing_slash,
        }
    }

    pub(crate) fn map_segments<F>(&mut self, f: F)
    where
        F: FnMut(&String) -> String,
    {
        self.segments = self.segments.iter().map(f).collect();
    }

    /// Replaces the segments, keeping the rooted flag and deriving the
    /// trailing slash from a final empty segment.
    pub(crate) fn assign(&mut self, mut segments: Vec<String>) {
        if segments.last().is_some_and(String::is_empty) {
            segments.pop();
            self.trailing_slash = !segments.is_empty();
        } else {
            self.trailing_slash = false;
        }
        self.segments = segments;
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path starts with `/`.
    #[must_use]
    pub const fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// Marks the trail as rooted or not.
    pub fn set_rooted(&mut self, rooted: bool) {
        self.rooted = rooted;
    }

    /// Returns true if the path ends with `/` after at least one segment.
    #[must_use]
    pub const fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Returns true if the path renders to something other than `""`.
    #[must_use]
    pub fn has_path(&self) -> bool {
        self.trailing_slash || self.rooted || !self.segments.is_empty()
    }

    /// Returns true if the directory part renders to something other than `""`.
    #[must_use]
    pub fn has_directory(&self) -> bool {
        self.trailing_slash || self.rooted || self.segments.len() > 1
    }

    /// Returns true if the trail ends in a document segment.
    #[must_use]
    pub fn has_document(&self) -> bool {
        !self.segments.is_empty() && !self.trailing_slash
    }

    /// Returns the segments that make up the directory.
    #[must_use]
    pub fn directory_trail(&self) -> &[String] {
        if self.trailing_slash {
            &self.segments
        } else if self.segments.len() > 1 {
            &self.segments[..self.segments.len() - 1]
        } else {
            &[]
        }
    }

    /// Returns the directory, including its trailing `/`.
    #[must_use]
    pub fn directory(&self) -> String {
        render_directory(self.rooted, self.directory_trail())
    }

    /// Returns the document segment, or `""` for a directory.
    #[must_use]
    pub fn document(&self) -> &str {
        match self.segments.last() {
            Some(last) if !self.trailing_slash => last,
            _ => "",
        }
    }

    /// Replaces the directory, keeping the current document.
    ///
    /// # Errors
    ///
    /// Returns `PathError::DirectoryWithoutSlash` unless `directory` ends in `/`.
    pub fn set_directory(&mut self, directory: &str) -> Result<(), PathError> {
        if !directory.ends_with(PATH_SEPARATOR) {
            return Err(PathError::DirectoryWithoutSlash {
                directory: directory.to_string(),
            });
        }
        let document = self.has_document().then(|| self.document().to_string());
        let parsed = Self::parse(directory);
        self.rooted = parsed.rooted;
        self.segments = parsed.segments;
        match document {
            Some(document) => {
                self.segments.push(document);
                self.trailing_slash = false;
            }
            None => self.trailing_slash = !self.segments.is_empty(),
        }
        Ok(())
    }

    /// Replaces the document, keeping the directory.
    ///
    /// An empty document leaves the trail naming its directory.
    pub fn set_document(&mut self, document: &str) {
        if self.has_document() {
            self.segments.pop();
        }
        if document.is_empty() {
            self.trailing_slash = !self.segments.is_empty();
        } else {
            self.segments.push(document.to_string());
            self.trailing_slash = false;
        }
    }

    /// Keeps the first `keep` segments and appends the `/`-separated parts of
    /// `path` after them.
    pub(crate) fn descend(&mut self, keep: usize, path: &str) {
        let mut segments = self.segments[..keep.min(self.segments.len())].to_vec();
        segments.extend(path.split(PATH_SEPARATOR).map(str::to_string));
        self.assign(segments);
    }

    /// Drops the last `levels` segments, leaving a directory.
    ///
    /// # Errors
    ///
    /// Returns `PathError::InvalidAscendLevels` for zero levels and
    /// `PathError::AscendTooFar` when `levels` exceeds the depth.
    pub fn ascend(&mut self, levels: usize) -> Result<(), PathError> {
        if levels < 1 {
            return Err(PathError::InvalidAscendLevels);
        }
        if levels > self.segments.len() {
            return Err(PathError::AscendTooFar {
                levels,
                depth: self.segments.len(),
            });
        }
        self.segments.truncate(self.segments.len() - levels);
        self.trailing_slash = !self.segments.is_empty();
        Ok(())
    }

    /// Renders the path with each segment passed through `encode`.
    pub(crate) fn render_with<F>(&self, mut encode: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        if self.rooted {
            out.push(PATH_SEPARATOR);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(PATH_SEPARATOR);
            }
            out.push_str(&encode(segment));
        }
        if self.trailing_slash && !self.segments.is_empty() {
            out.push(PATH_SEPARATOR);
        }
        out
    }
}

/// Renders a directory trail as `[/]seg/seg/`.
pub(crate) fn render_directory(rooted: bool, trail: &[String]) -> String {
    let mut out = String::new();
    if rooted {
        out.push(PATH_SEPARATOR);
    }
    for segment in trail {
        out.push_str(segment);
        out.push(PATH_SEPARATOR);
    }
    out
}

/// Returns true if `trail` begins with every segment of `prefix`.
pub(crate) fn starts_with(trail: &[String], prefix: &[String]) -> bool {
    trail.len() >= prefix.len() && trail.iter().zip(prefix).all(|(a, b)| a == b)
}

impl fmt::Display for PathTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parse_empty() {
        let trail = PathTrail::parse("");
        assert!(!trail.is_rooted());
        assert!(!trail.has_trailing_slash());
        assert_eq!(trail.depth(), 0);
        assert!(!trail.has_path());
        assert_eq!(trail.to_string(), "");
    }

    #[test]
    fn parse_root() {
        let trail = PathTrail::parse("/");
        assert!(trail.is_rooted());
        assert_eq!(trail.depth(), 0);
        assert!(trail.has_path());
        assert!(trail.has_directory());
        assert_eq!(trail.directory(), "/");
        assert_eq!(trail.to_string(), "/");
    }

    #[test]
    fn parse_relative_document() {
        let trail = PathTrail::parse("foo");
        assert!(!trail.is_rooted());
        assert_eq!(trail.segments(), ["foo"]);
        assert_eq!(trail.document(), "foo");
        assert!(trail.directory_trail().is_empty());
        assert!(!trail.has_directory());
    }

    #[test]
    fn parse_rooted_directory() {
        let trail = PathTrail::parse("/a/b/");
        assert!(trail.is_rooted());
        assert!(trail.has_trailing_slash());
        assert_eq!(trail.directory_trail(), ["a", "b"]);
        assert_eq!(trail.document(), "");
        assert_eq!(trail.to_string(), "/a/b/");
    }

    #[test]
    fn parse_keeps_dot_segments() {
        let trail = PathTrail::parse("/a/../b/./c");
        assert_eq!(trail.segments(), ["a", "..", "b", ".", "c"]);
        assert_eq!(trail.to_string(), "/a/../b/./c");
    }

    #[test]
    fn leading_empty_segment_renders_double_slash() {
        let trail = PathTrail::parse("//x");
        assert!(trail.is_rooted());
        assert_eq!(trail.segments(), ["", "x"]);
        assert_eq!(trail.to_string(), "//x");
    }

    #[test]
    fn parse_keeps_inner_empty_segments() {
        let trail = PathTrail::parse("a//b");
        assert_eq!(trail.segments(), ["a", "", "b"]);
        assert_eq!(trail.to_string(), "a//b");
    }

    #[test]
    fn relative_consumes_trailing_empty() {
        let trail = PathTrail::relative(segs(&["c", ""]));
        assert!(!trail.is_rooted());
        assert!(trail.has_trailing_slash());
        assert_eq!(trail.to_string(), "c/");
        assert_eq!(PathTrail::relative(Vec::new()).to_string(), "");
    }

    #[test]
    fn set_directory_keeps_document() {
        let mut trail = PathTrail::parse("/a/b/doc");
        trail.set_directory("x/y/").unwrap();
        assert!(!trail.is_rooted());
        assert_eq!(trail.to_string(), "x/y/doc");
    }

    #[test]
    fn set_directory_on_directory() {
        let mut trail = PathTrail::parse("/a/");
        trail.set_directory("/x/").unwrap();
        assert_eq!(trail.to_string(), "/x/");
    }

    #[test]
    fn set_directory_without_slash_fails() {
        let mut trail = PathTrail::parse("/a/b");
        let result = trail.set_directory("/x");
        assert!(matches!(result, Err(PathError::DirectoryWithoutSlash { .. })));
        assert_eq!(trail.to_string(), "/a/b");
    }

    #[test]
    fn set_document_replaces_last() {
        let mut trail = PathTrail::parse("/a/b");
        trail.set_document("c");
        assert_eq!(trail.to_string(), "/a/c");

        let mut trail = PathTrail::parse("/a/");
        trail.set_document("c");
        assert_eq!(trail.to_string(), "/a/c");

        let mut trail = PathTrail::parse("/a/b");
        trail.set_document("");
        assert_eq!(trail.to_string(), "/a/");
    }

    #[test]
    fn descend_after_directory() {
        let mut trail = PathTrail::parse("/a/b");
        let keep = trail.directory_trail().len();
        trail.descend(keep, "c/d");
        assert_eq!(trail.to_string(), "/a/c/d");

        let mut trail = PathTrail::parse("/a/");
        let keep = trail.directory_trail().len();
        trail.descend(keep, "c/");
        assert_eq!(trail.to_string(), "/a/c/");
    }

    #[test]
    fn ascend_leaves_directory() {
        let mut trail = PathTrail::parse("/a/b");
        trail.ascend(1).unwrap();
        assert_eq!(trail.to_string(), "/a/");

        let mut trail = PathTrail::parse("/a");
        trail.ascend(1).unwrap();
        assert_eq!(trail.to_string(), "/");

        let mut trail = PathTrail::parse("a");
        trail.ascend(1).unwrap();
        assert_eq!(trail.to_string(), "");
    }

    #[test]
    fn ascend_bounds() {
        assert!(matches!(
            PathTrail::parse("/a").ascend(0),
            Err(PathError::InvalidAscendLevels)
        ));
        assert!(matches!(
            PathTrail::parse("/a").ascend(2),
            Err(PathError::AscendTooFar { levels: 2, depth: 1 })
        ));
        assert!(PathTrail::parse("/").ascend(1).is_err());
        assert!(PathTrail::parse("").ascend(1).is_err());
    }

    #[test]
    fn starts_with_prefix() {
        assert!(starts_with(&segs(&["a", "b", "c"]), &segs(&["a", "b"])));
        assert!(starts_with(&segs(&["a"]), &[]));
        assert!(!starts_with(&segs(&["a"]), &segs(&["a", "b"])));
        assert!(!starts_with(&segs(&["a", "c"]), &segs(&["a", "b"])));
    }

    #[test]
    fn render_with_encoder() {
        let trail = PathTrail::parse("/a b/c");
        let rendered = trail.render_with(|s| s.replace(' ', "%20"));
        assert_eq!(rendered, "/a%20b/c");
    }
}
