use sha2::{Digest, Sha256};

use crate::schema::PersistedPortfolio;

pub type SnapshotHash = [u8; 32];

/// SHA-256 of the outbound JSON. Object keys serialize in sorted order, so
/// equal documents always hash equally.
pub fn snapshot_hash(payload: &PersistedPortfolio) -> SnapshotHash {
    let bytes = serde_json::to_vec(payload).unwrap_or_default();
    let digest = Sha256::digest(&bytes);

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&digest);
    hash
}
