/// Content digests for stored blobs
use sha2::{Digest, Sha256};

/// Length in characters of a digest returned by [`digest`]
pub const DIGEST_LEN: usize = 64;

/// Lower-case hex SHA-256 of `data`.
///
/// Recorded for display and audit; downloads do not re-check it.
pub fn digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
