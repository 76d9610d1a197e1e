use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an item within its bibliography.
///
/// Ids are minted once when an item enters the bibliography and stay valid
/// for the lifetime of the document, across hide/show and record rewrites.
/// Equality and hashing are on the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a document seed from its name using CRC32
pub fn document_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for items within a document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Document seed (CRC32)
    count: u32,   // Sequential counter
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: document_seed(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Mint the next sequential id
    pub fn next_id(&mut self) -> ItemId {
        self.count += 1;
        ItemId(format!("{}-{}", self.seed, self.count))
    }

    /// Get the document seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}
