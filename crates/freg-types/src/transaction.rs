use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Reference to a mutating ledger call accepted by a node.
///
/// Usually the `0x`-prefixed transaction hash. Acceptance does not imply
/// inclusion in a block, let alone finality.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRef(String);

impl TransactionRef {
    pub fn new(reference: impl Into<String>) -> Result<Self, TypeError> {
        let reference = reference.into();
        if reference.is_empty() {
            return Err(TypeError::EmptyTransactionRef);
        }
        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for TransactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionRef({})", self.0)
    }
}

impl fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reference_rejected() {
        assert_eq!(TransactionRef::new(""), Err(TypeError::EmptyTransactionRef));
    }

    #[test]
    fn display_matches_input() {
        let hash = format!("0x{}", "ab".repeat(32));
        let tx = TransactionRef::new(hash.clone()).unwrap();
        assert_eq!(tx.to_string(), hash);
        assert_eq!(tx.as_str().len(), 66);
    }
}
