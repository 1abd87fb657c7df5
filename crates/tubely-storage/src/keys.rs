//! Shared key generation for storage backends.
//!
//! Key format: `{url-safe base64 of 32 random bytes, unpadded}.{extension}`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::TryRngCore;
use tubely_core::{MediaKind, StorageKey};

use crate::traits::{StorageError, StorageResult};

/// Number of random bytes behind every key.
pub const KEY_ENTROPY_BYTES: usize = 32;

/// Generate a fresh storage key for an asset of the given media kind.
///
/// Randomness comes from the operating system. If it is unavailable the upload fails;
/// there is no fallback to a weaker source.
pub fn generate_storage_key(kind: MediaKind) -> StorageResult<StorageKey> {
    let mut randomness = [0u8; KEY_ENTROPY_BYTES];
    OsRng
        .try_fill_bytes(&mut randomness)
        .map_err(|e| StorageError::KeyGeneration(e.to_string()))?;

    let encoded = URL_SAFE_NO_PAD.encode(randomness);
    Ok(StorageKey::new(format!("{}.{}", encoded, kind.extension())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_has_encoded_body_and_extension() {
        let key = generate_storage_key(MediaKind::Png).unwrap();
        let (body, extension) = key.as_str().rsplit_once('.').unwrap();

        assert_eq!(extension, "png");
        // 32 bytes -> 43 unpadded base64 characters
        assert_eq!(body.len(), 43);
        assert_eq!(URL_SAFE_NO_PAD.decode(body).unwrap().len(), KEY_ENTROPY_BYTES);
    }

    #[test]
    fn key_is_safe_as_path_segment() {
        for kind in MediaKind::ALL {
            let key = generate_storage_key(kind).unwrap();
            assert!(!key.as_str().contains('/'));
            assert!(!key.as_str().contains('\\'));
            assert!(!key.as_str().contains('='));
            assert!(!key.as_str().starts_with('.'));
        }
    }

    #[test]
    fn keys_are_not_reused() {
        let keys: HashSet<_> = (0..256)
            .map(|_| generate_storage_key(MediaKind::Mp4).unwrap())
            .collect();
        assert_eq!(keys.len(), 256);
    }
}
