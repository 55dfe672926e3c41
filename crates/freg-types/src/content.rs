use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Content identifier (CID) naming a blob in the content-addressable store.
///
/// A CID produced by the store is always non-empty. A CID read back from the
/// ledger may be the ledger's unset value, the empty string; the ledger does
/// not distinguish a path that was never saved from one saved with an empty
/// value, so neither does this type. Use [`ContentId::is_unset`] to detect it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Create a CID from a value returned by the content store.
    pub fn new(cid: impl Into<String>) -> Result<Self, TypeError> {
        let cid = cid.into();
        if cid.is_empty() {
            return Err(TypeError::EmptyContentId);
        }
        Ok(Self(cid))
    }

    /// Wrap a value decoded from a ledger record without validation.
    pub fn from_ledger(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The ledger's value for a record that holds nothing.
    pub fn unset() -> Self {
        Self(String::new())
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unset() {
            write!(f, "ContentId(<unset>)")
        } else {
            write!(f, "ContentId({})", self.0)
        }
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
