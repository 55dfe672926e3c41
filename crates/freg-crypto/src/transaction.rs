use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_signer::SignerSync;

use crate::signer::{SignerError, SignerParams};

/// A contract call ready to be signed: everything but the signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyCall {
    pub to: Address,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub input: Bytes,
}

/// An RLP-encoded, signed transaction and its hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Bytes,
    pub hash: B256,
}

impl SignerParams {
    /// Sign a zero-value contract call as an EIP-155 legacy transaction bound
    /// to this signer's chain id.
    pub fn sign_call(&self, call: LegacyCall) -> Result<SignedTransaction, SignerError> {
        let tx = TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: call.nonce,
            gas_price: call.gas_price,
            gas_limit: call.gas_limit,
            to: TxKind::Call(call.to),
            value: U256::ZERO,
            input: call.input,
        };

        let signature = self
            .signer
            .sign_hash_sync(&tx.signature_hash())
            .map_err(|e| SignerError::Signing(e.to_string()))?;

        let envelope = TxEnvelope::from(tx.into_signed(signature));
        Ok(SignedTransaction {
            raw: Bytes::from(envelope.encoded_2718()),
            hash: *envelope.tx_hash(),
        })
    }
}
