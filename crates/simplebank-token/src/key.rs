//! Symmetric key material shared by both makers.

use hkdf::Hkdf;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;

use crate::error::MakerError;

/// Minimum secret length accepted by every maker.
pub const MIN_SECRET_KEY_SIZE: usize = 32;

/// Size of a PASETO v4.local key.
pub const LOCAL_KEY_SIZE: usize = 32;

/// HKDF salt for stretching long secrets into a v4.local key.
const HKDF_SALT: &[u8] = b"simplebank-token-hkdf-salt-v1";

/// HKDF info string for the v4.local key.
const HKDF_INFO: &[u8] = b"simplebank-paseto-v4-local";

/// Reject secrets shorter than [`MIN_SECRET_KEY_SIZE`].
pub const fn check_key_size(secret: &[u8]) -> Result<(), MakerError> {
    if secret.len() < MIN_SECRET_KEY_SIZE {
        return Err(MakerError::InvalidKeySize {
            min: MIN_SECRET_KEY_SIZE,
            actual: secret.len(),
        });
    }
    Ok(())
}

/// Turn a secret of at least 32 bytes into an exact 32-byte local key.
///
/// A 32-byte secret is used verbatim so tokens stay interoperable with other
/// v4.local implementations. Longer secrets go through HKDF-SHA256.
///
/// The caller is responsible for zeroizing the returned bytes.
pub fn derive_local_key(secret: &[u8]) -> Result<[u8; LOCAL_KEY_SIZE], MakerError> {
    check_key_size(secret)?;

    let mut key = [0u8; LOCAL_KEY_SIZE];
    if secret.len() == LOCAL_KEY_SIZE {
        key.copy_from_slice(secret);
        return Ok(key);
    }

    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), secret);
    hk.expand(HKDF_INFO, &mut key)
        .map_err(|e| MakerError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

/// Fill `buf` from the OS CSPRNG, surfacing failure instead of panicking.
pub fn fill_random(buf: &mut [u8]) -> Result<(), MakerError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| MakerError::RandomSource(e.to_string()))
}
