use freg_types::{ContentId, TransactionRef};

/// Multicodec code for raw binary content.
const RAW_CODEC: u8 = 0x55;
/// Multihash code for BLAKE3-256.
const BLAKE3_MULTIHASH: u8 = 0x1e;
const CID_V1: u8 = 0x01;

/// Compute a CIDv1 (raw codec, BLAKE3 multihash) for `data`.
///
/// The CID is rendered in base16 multibase (`f` prefix), so it is a valid,
/// self-describing CID string without pulling in a base32 codec.
pub fn raw_content_id(data: &[u8]) -> ContentId {
    let digest = blake3::hash(data);
    let mut bytes = Vec::with_capacity(4 + 32);
    bytes.extend_from_slice(&[CID_V1, RAW_CODEC, BLAKE3_MULTIHASH, 32]);
    bytes.extend_from_slice(digest.as_bytes());
    ContentId::new(format!("f{}", hex::encode(bytes))).expect("multibase string is never empty")
}

/// Domain-separated BLAKE3 hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so two hashers never agree on the same input.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for simulated transaction hashes.
    pub const TRANSACTION: Self = Self {
        domain: "freg-tx-v1",
    };

    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash a sequence of byte strings. Each part is length-prefixed so
    /// `["ab", "c"]` and `["a", "bc"]` hash differently.
    pub fn hash_parts(&self, parts: &[&[u8]]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        for part in parts {
            hasher.update(&(part.len() as u64).to_be_bytes());
            hasher.update(part);
        }
        *hasher.finalize().as_bytes()
    }

    /// Hash parts into a `0x`-prefixed transaction reference.
    pub fn transaction_ref(&self, parts: &[&[u8]]) -> TransactionRef {
        let hash = self.hash_parts(parts);
        TransactionRef::new(format!("0x{}", hex::encode(hash)))
            .expect("hex-encoded hash is never empty")
    }
}
