use zeroize::Zeroizing;

use crate::signer::SignerError;

/// Chain id used when none is configured (Ethereum mainnet).
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Private key material plus the chain it signs for.
///
/// Loaded once at process start and owned by the [`TransactionSigner`].
/// The raw key bytes are zeroized on drop and never appear in `Debug` output.
///
/// [`TransactionSigner`]: crate::signer::TransactionSigner
pub struct SignerIdentity {
    key: Zeroizing<Vec<u8>>,
    chain_id: u64,
}

impl SignerIdentity {
    /// Create from raw key bytes. The bytes are not checked here; parsing
    /// happens in [`TransactionSigner::authorize`].
    ///
    /// [`TransactionSigner::authorize`]: crate::signer::TransactionSigner::authorize
    pub fn new(key: impl Into<Vec<u8>>, chain_id: u64) -> Self {
        Self {
            key: Zeroizing::new(key.into()),
            chain_id,
        }
    }

    /// Decode a hex private key, with or without a `0x` prefix.
    pub fn from_hex(key_hex: &str, chain_id: u64) -> Result<Self, SignerError> {
        let trimmed = key_hex.strip_prefix("0x").unwrap_or(key_hex);
        if trimmed.is_empty() {
            return Err(SignerError::InvalidKey("private key is empty".into()));
        }
        let bytes = Zeroizing::new(
            hex::decode(trimmed)
                .map_err(|e| SignerError::InvalidKey(format!("private key is not hex: {e}")))?,
        );
        Ok(Self::new(bytes.to_vec(), chain_id))
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub(crate) fn key_bytes(&self) -> &[u8] {
        &self.key
    }
}

impl std::fmt::Debug for SignerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerIdentity")
            .field("key", &"<redacted>")
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
