use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use freg_crypto::{SignerParams, TransactionSigner};
use freg_ledger::{ContractBinding, EthLedger, LedgerBinding};
use freg_store::{ContentStore, IpfsContentStore};
use freg_types::{ContentId, PathKey, TransactionRef};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};

/// Outcome of a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReceipt {
    pub cid: ContentId,
    pub tx: TransactionRef,
}

/// File registry orchestrator.
///
/// Stores file bytes in a content store and records the returned CID against
/// a path in the ledger. Holds no per-request state: one instance is shared
/// (behind an `Arc`) by every concurrent request.
pub struct Registry {
    store: Arc<dyn ContentStore>,
    ledger: Arc<dyn LedgerBinding>,
    auth: SignerParams,
    deadline: Option<Duration>,
}

impl Registry {
    /// Authorize `signer` once and wire it to the given backends.
    pub fn new(
        store: Arc<dyn ContentStore>,
        ledger: Arc<dyn LedgerBinding>,
        signer: &TransactionSigner,
    ) -> RegistryResult<Self> {
        let auth = signer.authorize()?;
        Ok(Self {
            store,
            ledger,
            auth,
            deadline: None,
        })
    }

    /// Build the network-backed registry described by `config`.
    ///
    /// Fails fast on an unusable key, chain id or contract interface.
    pub fn connect(config: &RegistryConfig) -> RegistryResult<Self> {
        let signer = TransactionSigner::new(config.signer_identity()?);

        let binding = match &config.abi_path {
            Some(path) => ContractBinding::load(
                path,
                config.contract_address,
                config.eth_rpc_url.clone(),
            )?,
            None => ContractBinding::bundled(config.contract_address, config.eth_rpc_url.clone())?,
        };
        let ledger = EthLedger::new(binding)?;
        let store = IpfsContentStore::new(&config.ipfs_url)?;

        let registry = Self::new(Arc::new(store), Arc::new(ledger), &signer)?;
        tracing::info!(
            contract = %config.contract_address,
            rpc = %config.eth_rpc_url,
            store = %config.ipfs_url,
            chain_id = config.chain_id,
            signer = %registry.signer_address(),
            "registry connected"
        );
        Ok(registry)
    }

    /// Fail any request that runs longer than `deadline`.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Address transactions are sent from.
    pub fn signer_address(&self) -> Address {
        self.auth.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.auth.chain_id()
    }

    pub fn store_endpoint(&self) -> &str {
        self.store.endpoint()
    }

    /// Store `content` and record its CID under `path`.
    ///
    /// The store write always happens before the ledger write. If the ledger
    /// write fails the content stays in the store unreferenced.
    pub async fn upload(&self, path: &str, content: &[u8]) -> RegistryResult<UploadReceipt> {
        let path = PathKey::new(path)?;
        self.within_deadline(async {
            let cid = self.store.add(content).await?;
            tracing::debug!(path = %path, cid = %cid, bytes = content.len(), "content stored");

            let tx = self.ledger.save(&self.auth, &path, &cid).await.map_err(|e| {
                tracing::warn!(path = %path, cid = %cid, error = %e, "ledger save failed, content left in store");
                e
            })?;

            tracing::info!(path = %path, cid = %cid, tx = %tx, "file uploaded");
            Ok(UploadReceipt { cid, tx })
        })
        .await
    }

    /// Read the CID recorded for `path`. A path that was never uploaded
    /// yields [`ContentId::unset`].
    pub async fn resolve(&self, path: &str) -> RegistryResult<ContentId> {
        let path = PathKey::new(path)?;
        self.within_deadline(async {
            let cid = self.ledger.get(&path).await?;
            tracing::debug!(path = %path, cid = %cid, "path resolved");
            Ok(cid)
        })
        .await
    }

    async fn within_deadline<T, F>(&self, fut: F) -> RegistryResult<T>
    where
        F: Future<Output = RegistryResult<T>>,
    {
        match self.deadline {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| RegistryError::Cancelled(limit))?,
            None => fut.await,
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("store", &self.store.endpoint())
            .field("signer", &self.auth)
            .field("deadline", &self.deadline)
            .finish()
    }
}
