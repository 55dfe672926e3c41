use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Logical file name under which a content identifier is registered.
///
/// A `PathKey` is an opaque, non-empty string. No normalization is applied:
/// `"/docs/"` and `"/docs"` are distinct keys, as are keys differing only in
/// case or surrounding whitespace.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathKey(String);

impl PathKey {
    /// Create a path key, rejecting the empty string.
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.is_empty() {
            return Err(TypeError::EmptyPath);
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PathKey {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PathKey {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PathKey> for String {
    fn from(key: PathKey) -> Self {
        key.0
    }
}

impl AsRef<str> for PathKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathKey({:?})", self.0)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
