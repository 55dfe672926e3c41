use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;

use crate::identity::SignerIdentity;

/// Errors from signer setup and transaction signing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignerError {
    /// The key material does not parse into a secp256k1 signing key.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// The chain id cannot be bound to the signer.
    #[error("cannot bind signer to chain {chain_id}: {reason}")]
    ChainBinding { chain_id: u64, reason: String },

    /// Signing a prepared transaction failed.
    #[error("signing failed: {0}")]
    Signing(String),
}

/// Holds the process signer identity and hands out authorization contexts.
///
/// The signer is stateless beyond the identity it owns: it does not track
/// nonces, which belong to the ledger binding.
#[derive(Debug)]
pub struct TransactionSigner {
    identity: SignerIdentity,
}

impl TransactionSigner {
    pub fn new(identity: SignerIdentity) -> Self {
        Self { identity }
    }

    pub fn chain_id(&self) -> u64 {
        self.identity.chain_id()
    }

    /// Build a reusable authorization context for mutating ledger calls.
    ///
    /// Deterministic for a given identity: every call yields params for the
    /// same address and chain.
    pub fn authorize(&self) -> Result<SignerParams, SignerError> {
        let chain_id = self.identity.chain_id();
        if chain_id == 0 {
            return Err(SignerError::ChainBinding {
                chain_id,
                reason: "chain id 0 is not replay-protected under EIP-155".into(),
            });
        }

        let signer = PrivateKeySigner::from_slice(self.identity.key_bytes())
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?
            .with_chain_id(Some(chain_id));

        Ok(SignerParams { signer, chain_id })
    }
}

/// Authorization context for one or more mutating ledger calls.
///
/// Cheap to clone; holds the parsed signing key bound to a chain id.
#[derive(Clone)]
pub struct SignerParams {
    pub(crate) signer: PrivateKeySigner,
    pub(crate) chain_id: u64,
}

impl SignerParams {
    /// Address that submits transactions signed with these params.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl std::fmt::Debug for SignerParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerParams")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
