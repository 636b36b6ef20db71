use std::fmt;

/// Ordered tuple identifying a cached read.
///
/// Filter parameters are segments too, so `["transactions", "type=DEBIT"]`
/// and `["transactions"]` cache independently while still matching the
/// `["transactions"]` prefix for invalidation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn root(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// A new key with one more segment appended.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl<const N: usize> From<[&str; N]> for QueryKey {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl From<&[&str]> for QueryKey {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

impl From<Vec<String>> for QueryKey {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matching() {
        let list = QueryKey::from(["accounts"]);
        let entity = list.join("42");

        assert!(entity.starts_with(&list));
        assert!(list.starts_with(&list));
        assert!(!list.starts_with(&entity));
        assert!(!QueryKey::from(["transactions"]).starts_with(&list));
        // Prefixes are whole segments, not string prefixes.
        assert!(!QueryKey::from(["accountsx"]).starts_with(&list));
    }

    #[test]
    fn display_joins_segments() {
        assert_eq!(QueryKey::from(["accounts", "42"]).to_string(), "accounts/42");
    }
}
