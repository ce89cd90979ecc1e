//! Content hashing for run manifests.

use sha2::{Digest, Sha256};

/// Hex SHA-256 of an engine input script.
pub fn script_digest(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_stability() {
        assert_eq!(script_digest(b"\nc\n"), script_digest(b"\nc\n"));
        assert_eq!(script_digest(b"").len(), 64);
    }

    #[test]
    fn digest_differs_for_different_scripts() {
        assert_ne!(script_digest(b"1 1\n"), script_digest(b"1 2\n"));
    }
}
