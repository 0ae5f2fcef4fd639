//! Hierarchical cache keys.

use std::fmt;

#[cfg(test)]
#[path = "key_test.rs"]
mod key_test;

/// Ordered list of segments identifying a cached query, e.g.
/// `["posts", "recent"]`. Invalidation works on segment prefixes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Append one more segment.
    #[must_use]
    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Whether `prefix` matches this key segment-by-segment.
    ///
    /// `["posts"]` matches `["posts", "recent"]` but not `["post", "1"]`.
    #[must_use]
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl From<&str> for QueryKey {
    fn from(segment: &str) -> Self {
        Self(vec![segment.to_owned()])
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Build a [`QueryKey`] from anything implementing `ToString`.
///
/// ```
/// let key = query::query_key!("post", 42);
/// assert_eq!(key.segments(), ["post", "42"]);
/// ```
#[macro_export]
macro_rules! query_key {
    ($($segment:expr),+ $(,)?) => {
        $crate::QueryKey::new([$(::std::string::ToString::to_string(&$segment)),+])
    };
}
