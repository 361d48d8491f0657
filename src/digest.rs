use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::types::CitedRecord;

/// Compute SHA-256 content hash of serialized content.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Hash of the output artifact exactly as [`crate::corpus::write_artifact`]
/// would write it. Two runs over the same corpus yield the same digest.
pub fn artifact_digest(records: &[CitedRecord]) -> Result<String> {
    let json = serde_json::to_string_pretty(records)?;
    Ok(content_hash(&json))
}
