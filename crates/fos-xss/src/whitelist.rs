//! Tag and attribute whitelist
//!
//! Maps a lowercase tag name to the ordered list of lowercase attribute
//! names permitted on it. A whitelist is plain data: the sanitizer only
//! ever reads it, so one instance can be shared freely between threads.

use crate::XssError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

/// Built-in table used by [`Whitelist::default`]
pub const DEFAULT_TAGS: &[(&str, &[&str])] = &[
    ("h1", &["style", "class"]),
    ("h2", &["style", "class"]),
    ("h3", &["style", "class"]),
    ("h4", &["style", "class"]),
    ("h5", &["style", "class"]),
    ("hr", &["style", "class"]),
    ("span", &["style", "class"]),
    ("strong", &["style", "class"]),
    ("b", &["style", "class"]),
    ("i", &["style", "class"]),
    ("p", &["style", "class"]),
    ("pre", &["style", "class"]),
    ("code", &["style", "class"]),
    ("a", &["style", "class", "target", "href", "title"]),
    ("img", &["style", "class", "src", "alt", "title"]),
    ("div", &["style", "class"]),
    ("table", &["style", "class", "width", "border"]),
    ("tr", &["style", "class"]),
    ("td", &["style", "class", "width", "colspan"]),
    ("th", &["style", "class", "width", "colspan"]),
    ("tbody", &["style", "class"]),
];

static DEFAULT_WHITELIST: OnceLock<Whitelist> = OnceLock::new();

/// Get the shared built-in whitelist
///
/// Initialized on first use and never mutated afterwards. Callers wanting
/// a variation should clone it (or start from [`Whitelist::default`]).
pub fn default_whitelist() -> &'static Whitelist {
    DEFAULT_WHITELIST.get_or_init(Whitelist::default)
}

/// Which kind of name failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Tag,
    Attribute,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Tag => f.write_str("tag"),
            NameKind::Attribute => f.write_str("attribute"),
        }
    }
}

/// Normalize a configured name to trimmed lowercase and reject names the
/// scanner could never produce or that would break a serialized tag.
fn normalize_name(kind: NameKind, name: &str) -> Result<String, XssError> {
    let normalized = name.trim().to_lowercase();
    let invalid = normalized.is_empty()
        || normalized
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'' | '=' | '/'));

    if invalid {
        return Err(XssError::InvalidName { kind, name: name.to_string() });
    }
    Ok(normalized)
}

/// Permitted tags and their permitted attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    tags: HashMap<String, Vec<String>>,
}

impl Whitelist {
    /// Create a whitelist that permits nothing
    pub fn empty() -> Self {
        Self { tags: HashMap::new() }
    }

    /// Build a whitelist from `(tag, attributes)` pairs
    pub fn from_entries<I, T, A, S>(entries: I) -> Result<Self, XssError>
    where
        I: IntoIterator<Item = (T, A)>,
        T: AsRef<str>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut whitelist = Self::empty();
        for (tag, attrs) in entries {
            whitelist.allow_attrs(tag.as_ref(), attrs)?;
        }
        Ok(whitelist)
    }

    /// Parse a whitelist from a JSON object of `{"tag": ["attr", ...]}`
    pub fn from_json(json: &str) -> Result<Self, XssError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    /// Serialize to pretty JSON, tags in sorted order
    pub fn to_json(&self) -> Result<String, XssError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Permit a tag (with no attributes unless already present)
    pub fn allow_tag(&mut self, tag: &str) -> Result<&mut Self, XssError> {
        let tag = normalize_name(NameKind::Tag, tag)?;
        self.tags.entry(tag).or_default();
        Ok(self)
    }

    /// Permit attributes on a tag, permitting the tag itself if needed.
    /// Attributes already present keep their position.
    pub fn allow_attrs<A, S>(&mut self, tag: &str, attrs: A) -> Result<&mut Self, XssError>
    where
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tag = normalize_name(NameKind::Tag, tag)?;
        let attrs = attrs
            .into_iter()
            .map(|attr| normalize_name(NameKind::Attribute, attr.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let allowed = self.tags.entry(tag).or_default();
        for attr in attrs {
            if !allowed.contains(&attr) {
                allowed.push(attr);
            }
        }
        Ok(self)
    }

    /// Stop permitting a tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(&tag.trim().to_lowercase()).is_some()
    }

    /// Stop permitting one attribute on a tag. Returns whether it was present.
    pub fn remove_attr(&mut self, tag: &str, attr: &str) -> bool {
        let attr = attr.trim().to_lowercase();
        match self.tags.get_mut(&tag.trim().to_lowercase()) {
            Some(allowed) => {
                let before = allowed.len();
                allowed.retain(|a| *a != attr);
                allowed.len() != before
            }
            None => false,
        }
    }

    /// Merge another whitelist into this one
    pub fn extend(&mut self, other: &Whitelist) {
        for (tag, attrs) in &other.tags {
            let allowed = self.tags.entry(tag.clone()).or_default();
            for attr in attrs {
                if !allowed.contains(attr) {
                    allowed.push(attr.clone());
                }
            }
        }
    }

    /// Check whether a (lowercase) tag is permitted
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Check whether a (lowercase) attribute is permitted on a (lowercase) tag
    pub fn allows_attr(&self, tag: &str, attr: &str) -> bool {
        self.attrs(tag)
            .map(|allowed| allowed.iter().any(|a| a == attr))
            .unwrap_or(false)
    }

    /// Permitted attributes of a tag, `None` if the tag is not permitted
    pub fn attrs(&self, tag: &str) -> Option<&[String]> {
        self.tags.get(tag).map(Vec::as_slice)
    }

    /// Iterate over the permitted tag names (unordered)
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for Whitelist {
    fn default() -> Self {
        let tags = DEFAULT_TAGS
            .iter()
            .map(|(tag, attrs)| {
                let attrs = attrs.iter().map(|a| a.to_string()).collect::<Vec<_>>();
                (tag.to_string(), attrs)
            })
            .collect();
        Self { tags }
    }
}

impl Serialize for Whitelist {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&str, &[String]> = self
            .tags
            .iter()
            .map(|(tag, attrs)| (tag.as_str(), attrs.as_slice()))
            .collect();
        sorted.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Whitelist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, Vec<String>>::deserialize(deserializer)?;
        Whitelist::from_entries(raw).map_err(serde::de::Error::custom)
    }
}
