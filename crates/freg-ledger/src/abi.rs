use std::path::Path;

use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi, StateMutability};
use alloy_primitives::{Address, Bytes};
use url::Url;

use freg_types::{ContentId, PathKey};

use crate::error::{LedgerError, LedgerResult};

/// Interface description of the `FileRegistry` contract shipped with the crate.
pub const BUNDLED_ABI: &str = include_str!("../abi/file_registry.abi.json");

const SAVE_SIGNATURE: &str = "save(string,string)";
const GET_SIGNATURE: &str = "get(string)";

/// Parsed contract interface bound to a contract address and RPC endpoint.
///
/// Built once at startup. Only the two functions the registry uses are kept;
/// both are checked for the expected signature and mutability up front so a
/// wrong ABI file fails at load time rather than on the first request.
#[derive(Clone, Debug)]
pub struct ContractBinding {
    address: Address,
    rpc_url: Url,
    save_fn: Function,
    get_fn: Function,
}

impl ContractBinding {
    /// Bind the ABI bundled with this crate.
    pub fn bundled(address: Address, rpc_url: Url) -> LedgerResult<Self> {
        Self::from_abi_json(BUNDLED_ABI, address, rpc_url)
    }

    /// Read an ABI JSON file and bind it.
    pub fn load(path: &Path, address: Address, rpc_url: Url) -> LedgerResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| LedgerError::AbiLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_abi_json(&json, address, rpc_url)
    }

    /// Parse ABI JSON (a Solidity compiler `abi` array) and bind it.
    pub fn from_abi_json(json: &str, address: Address, rpc_url: Url) -> LedgerResult<Self> {
        let abi: JsonAbi =
            serde_json::from_str(json).map_err(|e| LedgerError::Abi(e.to_string()))?;

        let save_fn = find_function(&abi, "save", SAVE_SIGNATURE)?;
        if matches!(
            save_fn.state_mutability,
            StateMutability::View | StateMutability::Pure
        ) {
            return Err(LedgerError::Abi(format!(
                "{SAVE_SIGNATURE} must be state-mutating"
            )));
        }

        let get_fn = find_function(&abi, "get", GET_SIGNATURE)?;
        if !matches!(
            get_fn.state_mutability,
            StateMutability::View | StateMutability::Pure
        ) {
            return Err(LedgerError::Abi(format!("{GET_SIGNATURE} must be view or pure")));
        }
        if get_fn.outputs.len() != 1 || get_fn.outputs[0].ty != "string" {
            return Err(LedgerError::Abi(format!(
                "{GET_SIGNATURE} must return a single string"
            )));
        }

        Ok(Self {
            address,
            rpc_url,
            save_fn,
            get_fn,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Calldata for `save(path, cid)`, selector included.
    pub fn encode_save(&self, path: &PathKey, cid: &ContentId) -> LedgerResult<Bytes> {
        self.save_fn
            .abi_encode_input(&[
                DynSolValue::String(path.as_str().to_owned()),
                DynSolValue::String(cid.as_str().to_owned()),
            ])
            .map(Bytes::from)
            .map_err(|e| LedgerError::Abi(e.to_string()))
    }

    /// Calldata for `get(path)`, selector included.
    pub fn encode_get(&self, path: &PathKey) -> LedgerResult<Bytes> {
        self.get_fn
            .abi_encode_input(&[DynSolValue::String(path.as_str().to_owned())])
            .map(Bytes::from)
            .map_err(|e| LedgerError::Abi(e.to_string()))
    }

    /// Decode the return data of `get`. An empty string decodes to
    /// [`ContentId::unset`].
    pub fn decode_get(&self, data: &[u8]) -> LedgerResult<ContentId> {
        let mut values = self
            .get_fn
            .abi_decode_output(data, true)
            .map_err(|e| LedgerError::Abi(format!("cannot decode {GET_SIGNATURE} output: {e}")))?;

        match values.pop() {
            Some(DynSolValue::String(cid)) if values.is_empty() => Ok(ContentId::from_ledger(cid)),
            other => Err(LedgerError::Abi(format!(
                "unexpected {GET_SIGNATURE} output: {other:?}"
            ))),
        }
    }
}

fn find_function(abi: &JsonAbi, name: &str, signature: &str) -> LedgerResult<Function> {
    abi.function(name)
        .and_then(|overloads| overloads.iter().find(|f| f.signature() == signature))
        .cloned()
        .ok_or_else(|| LedgerError::Abi(format!("missing function {signature}")))
}
