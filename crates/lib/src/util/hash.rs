//! Content hashing for resource records.
//!
//! Every record handed to the engine is identified by an [`ObjectHash`]: a
//! truncated SHA-256 of its JSON serialization. Identical argument records
//! always hash identically, which makes manifests cheap to compare.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::OBJ_HASH_PREFIX_LEN;

pub type HashError = serde_json::Error;

/// A content-addressed hash identifying a unique object.
///
/// The hash is a 20-character lowercase hexadecimal prefix of the SHA-256 of
/// the JSON-serialized value, e.g. `"a1b2c3d4e5f6789012ab"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHash(pub String);

impl std::fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<ObjectHash, HashError> {
    let serialized = serde_json::to_string(self)?;
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let full = format!("{:x}", hasher.finalize());
    Ok(ObjectHash(full[..OBJ_HASH_PREFIX_LEN].to_string()))
  }
}
