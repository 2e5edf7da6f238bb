//! Path segments, paths and write locations.

use std::fmt;

use crate::error::MessageTreeError;

/// Segment name reserved for the validity flag on the exported shape.
pub const RESERVED_SEGMENT: &str = "isValid";

/// A step in a message tree path.
///
/// Either a named key or a non-negative sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Key(String),
    Index(u64),
}

impl Segment {
    /// Returns `false` for the reserved `isValid` key.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Segment::Key(key) if key == RESERVED_SEGMENT)
    }

    /// A named segment. Canonical integer names become `Index`.
    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key(key.into()).normalize()
    }

    /// Turn `Key("3")` into `Index(3)`; other segments are returned as-is.
    ///
    /// Every path and node normalizes the segments it is given, so a key
    /// spelled as an integer and the index itself address the same entry.
    pub fn normalize(self) -> Self {
        match self {
            Segment::Key(key) if is_index_key(&key) => match key.parse() {
                Ok(idx) => Segment::Index(idx),
                Err(_) => Segment::Key(key),
            },
            other => other,
        }
    }

    pub fn as_index(&self) -> Option<u64> {
        match self {
            Segment::Index(idx) => Some(*idx),
            Segment::Key(_) => None,
        }
    }
}

/// Check if a string is a canonical non-negative integer key.
///
/// `"0"` and `"42"` are, `"01"`, `"-1"` and `""` are not.
pub fn is_index_key(key: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    let bytes = key.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::key(key)
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::key(key)
    }
}

impl From<&String> for Segment {
    fn from(key: &String) -> Self {
        Segment::from(key.as_str())
    }
}

impl From<u64> for Segment {
    fn from(idx: u64) -> Self {
        Segment::Index(idx)
    }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self {
        Segment::Index(idx as u64)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// An ordered sequence of segments addressing a node. The empty path is the
/// root.
///
/// Paths are not validated on construction; operations that use a path call
/// [`Path::validate`] before touching the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Parse a slash-delimited path.
    ///
    /// Surrounding whitespace and trailing slashes are trimmed, then the rest
    /// is split on `/` as-is: an empty string yields a single empty-string
    /// segment, and a leading slash yields a leading empty segment.
    ///
    /// # Example
    ///
    /// ```
    /// use message_tree::{Path, Segment};
    ///
    /// let path = Path::parse(" user/address/0/ ");
    /// assert_eq!(path.to_string(), "user/address/0");
    /// assert_eq!(path.last(), Some(&Segment::Index(0)));
    /// assert_eq!(Path::parse("").len(), 1);
    /// ```
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .trim_end_matches('/')
            .split('/')
            .map(Segment::from)
            .collect()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into().normalize());
    }

    pub fn pop(&mut self) -> Option<Segment> {
        self.0.pop()
    }

    /// Returns a new path with `other` appended after `self`.
    pub fn join(&self, other: &Path) -> Path {
        let mut joined = Vec::with_capacity(self.0.len() + other.0.len());
        joined.extend_from_slice(&self.0);
        joined.extend_from_slice(&other.0);
        Path(joined)
    }

    /// Returns a new path with one more segment.
    pub fn child(&self, segment: impl Into<Segment>) -> Path {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Returns the first `len` segments.
    pub fn prefix(&self, len: usize) -> Path {
        Path(self.0[..len.min(self.0.len())].to_vec())
    }

    pub fn is_valid(&self) -> bool {
        self.0.iter().all(Segment::is_valid)
    }

    /// # Errors
    ///
    /// `PathInvalid` if any segment is the reserved `isValid` key.
    pub fn validate(&self) -> Result<(), MessageTreeError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(MessageTreeError::PathInvalid(self.clone()))
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(input: &str) -> Self {
        Path::parse(input)
    }
}

impl From<String> for Path {
    fn from(input: String) -> Self {
        Path::parse(&input)
    }
}

impl From<&String> for Path {
    fn from(input: &String) -> Self {
        Path::parse(input)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl From<u64> for Path {
    fn from(idx: u64) -> Self {
        Path(vec![Segment::Index(idx)])
    }
}

impl From<Segment> for Path {
    fn from(segment: Segment) -> Self {
        Path(vec![segment.normalize()])
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        segments.into_iter().collect()
    }
}

impl<S: Into<Segment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path(iter.into_iter().map(|s| s.into().normalize()).collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Path {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Where a read or write lands in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Location {
    /// The current cursor.
    #[default]
    Cursor,
    /// An absolute path from the root.
    Absolute(Path),
    /// A path appended to the current cursor.
    Relative(Path),
}

impl Location {
    pub fn absolute(path: impl Into<Path>) -> Self {
        Location::Absolute(path.into())
    }

    pub fn relative(path: impl Into<Path>) -> Self {
        Location::Relative(path.into())
    }

    /// Resolve against `cursor`. The result is not validated.
    pub fn resolve(&self, cursor: &Path) -> Path {
        match self {
            Location::Cursor => cursor.clone(),
            Location::Absolute(path) => path.clone(),
            Location::Relative(path) => cursor.join(path),
        }
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Location::Absolute(Path::parse(path))
    }
}

impl From<Path> for Location {
    fn from(path: Path) -> Self {
        Location::Absolute(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Segment {
        Segment::Key(s.to_string())
    }

    #[test]
    fn test_segment_from_str_normalizes_indexes() {
        assert_eq!(Segment::from("0"), Segment::Index(0));
        assert_eq!(Segment::from("42"), Segment::Index(42));
        assert_eq!(Segment::from("01"), key("01"));
        assert_eq!(Segment::from("-1"), key("-1"));
        assert_eq!(Segment::from("1.5"), key("1.5"));
        assert_eq!(Segment::from(""), key(""));
        // Does not fit in u64.
        assert_eq!(
            Segment::from("99999999999999999999999"),
            key("99999999999999999999999")
        );
    }

    #[test]
    fn test_built_paths_normalize_integer_keys() {
        assert_eq!(Segment::key("7"), Segment::Index(7));
        assert_eq!(Segment::key("07"), key("07"));

        let built = Path::from(vec![key("a"), key("0")]);
        assert_eq!(built, Path::parse("a/0"));
        assert_eq!(Path::parse(&built.to_string()), built);

        let mut pushed = Path::root();
        pushed.push(key("12"));
        assert_eq!(pushed.segments(), &[Segment::Index(12)]);
        assert_eq!(Path::from(key("3")), Path::from(3u64));
    }

    #[test]
    fn test_reserved_segment() {
        assert!(!key("isValid").is_valid());
        assert!(key("isvalid").is_valid());
        assert!(Segment::Index(0).is_valid());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Path::parse("a/b/c").segments(), &[key("a"), key("b"), key("c")]);
        assert_eq!(Path::parse("a/b///").segments(), &[key("a"), key("b")]);
        assert_eq!(Path::parse("  a/1 ").segments(), &[key("a"), Segment::Index(1)]);
        assert_eq!(Path::parse("/a").segments(), &[key(""), key("a")]);
        assert_eq!(Path::parse("a//b").segments(), &[key("a"), key(""), key("b")]);
    }

    #[test]
    fn test_parse_empty_string_keeps_single_empty_segment() {
        assert_eq!(Path::parse("").segments(), &[key("")]);
        assert_eq!(Path::parse("///").segments(), &[key("")]);
        assert_eq!(Path::parse("   ").segments(), &[key("")]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Path::root().to_string(), "");
        assert_eq!(Path::parse("a/0/b").to_string(), "a/0/b");
        let path: Path = vec![key("x"), Segment::Index(3)].into();
        assert_eq!(path.to_string(), "x/3");
    }

    #[test]
    fn test_validate() {
        assert!(Path::parse("a/b").validate().is_ok());
        assert!(Path::root().validate().is_ok());
        assert_eq!(
            Path::parse("a/isValid/b").validate(),
            Err(MessageTreeError::PathInvalid(Path::parse("a/isValid/b")))
        );
    }

    #[test]
    fn test_join_and_child() {
        let base = Path::parse("a/b");
        assert_eq!(base.join(&Path::parse("c/d")), Path::parse("a/b/c/d"));
        assert_eq!(Path::root().join(&base), base);
        assert_eq!(base.child("c"), Path::parse("a/b/c"));
        assert_eq!(base.child(2u64), Path::parse("a/b/2"));
        assert_eq!(base.prefix(1), Path::parse("a"));
        assert_eq!(base.prefix(9), base);
    }

    #[test]
    fn test_location_resolve() {
        let cursor = Path::parse("user/address");
        assert_eq!(Location::Cursor.resolve(&cursor), cursor);
        assert_eq!(Location::absolute("city").resolve(&cursor), Path::parse("city"));
        assert_eq!(
            Location::relative("city").resolve(&cursor),
            Path::parse("user/address/city")
        );
    }
}
