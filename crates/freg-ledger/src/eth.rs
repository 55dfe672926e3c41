//! # Ethereum ledger binding
//!
//! `save` builds, signs and submits a legacy EIP-155 transaction:
//!
//! 1. ABI-encode `save(path, cid)`.
//! 2. Fetch the sender's pending nonce (`eth_getTransactionCount`).
//! 3. Fetch the gas price (`eth_gasPrice`) and estimate gas
//!    (`eth_estimateGas`).
//! 4. Sign locally with the signer params (key never leaves the process).
//! 5. Submit with `eth_sendRawTransaction`; the returned hash is the
//!    transaction reference.
//!
//! Nonces are read from the node on every call and never cached, so two
//! concurrent saves from the same signer can race for a nonce. The loser is
//! rejected by the node and surfaces as a submission error.
//!
//! `get` is a plain `eth_call` against the latest block.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use serde_json::json;

use freg_crypto::{LegacyCall, SignerParams};
use freg_types::{ContentId, PathKey, TransactionRef};

use crate::abi::ContractBinding;
use crate::error::{LedgerError, LedgerResult};
use crate::rpc::{JsonRpcClient, RpcError};
use crate::traits::LedgerBinding;

/// Network-backed ledger binding.
#[derive(Debug)]
pub struct EthLedger {
    binding: ContractBinding,
    rpc: JsonRpcClient,
}

impl EthLedger {
    /// Connect a JSON-RPC client to the binding's endpoint.
    pub fn new(binding: ContractBinding) -> LedgerResult<Self> {
        let rpc = JsonRpcClient::new(binding.rpc_url())
            .map_err(|e| LedgerError::Setup(e.to_string()))?;
        Ok(Self { binding, rpc })
    }

    pub fn with_rpc(binding: ContractBinding, rpc: JsonRpcClient) -> Self {
        Self { binding, rpc }
    }

    pub fn binding(&self) -> &ContractBinding {
        &self.binding
    }

    async fn prepare_call(&self, from: Address, input: Bytes) -> Result<LegacyCall, RpcError> {
        let to = self.binding.address();

        let nonce = self
            .rpc
            .request_quantity("eth_getTransactionCount", json!([from, "pending"]))
            .await?;
        let gas_price = self.rpc.request_quantity("eth_gasPrice", json!([])).await?;
        let gas_limit = self
            .rpc
            .request_quantity(
                "eth_estimateGas",
                json!([{ "from": from, "to": to, "data": input }]),
            )
            .await?;

        Ok(LegacyCall {
            to,
            nonce: narrow("nonce", nonce)?,
            gas_price,
            gas_limit: narrow("gas", gas_limit)?,
            input,
        })
    }
}

fn narrow(what: &str, value: u128) -> Result<u64, RpcError> {
    u64::try_from(value).map_err(|_| RpcError::Decode {
        method: what.to_string(),
        reason: format!("{value} does not fit in 64 bits"),
    })
}

#[async_trait]
impl LedgerBinding for EthLedger {
    async fn save(
        &self,
        auth: &SignerParams,
        path: &PathKey,
        cid: &ContentId,
    ) -> LedgerResult<TransactionRef> {
        let input = self
            .binding
            .encode_save(path, cid)
            .map_err(|e| LedgerError::Submission(e.to_string()))?;

        let call = self
            .prepare_call(auth.address(), input)
            .await
            .map_err(|e| LedgerError::Submission(e.to_string()))?;
        let nonce = call.nonce;

        let signed = auth
            .sign_call(call)
            .map_err(|e| LedgerError::Submission(e.to_string()))?;

        let tx_hash: String = self
            .rpc
            .request("eth_sendRawTransaction", json!([signed.raw]))
            .await
            .map_err(|e| LedgerError::Submission(e.to_string()))?;

        let local_hash = signed.hash.to_string();
        if !tx_hash.eq_ignore_ascii_case(&local_hash) {
            tracing::warn!(node = %tx_hash, local = %local_hash, "node reported a different transaction hash");
        }

        tracing::info!(path = %path, cid = %cid, tx = %tx_hash, nonce, "submitted save transaction");
        TransactionRef::new(tx_hash).map_err(|e| LedgerError::Submission(e.to_string()))
    }

    async fn get(&self, path: &PathKey) -> LedgerResult<ContentId> {
        let data = self
            .binding
            .encode_get(path)
            .map_err(|e| LedgerError::Query(e.to_string()))?;

        let output: Bytes = self
            .rpc
            .request(
                "eth_call",
                json!([{ "to": self.binding.address(), "data": data }, "latest"]),
            )
            .await
            .map_err(|e| LedgerError::Query(e.to_string()))?;

        let cid = self
            .binding
            .decode_get(&output)
            .map_err(|e| LedgerError::Query(e.to_string()))?;
        tracing::debug!(path = %path, cid = %cid, "read ledger record");
        Ok(cid)
    }
}
