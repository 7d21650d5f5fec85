//! Encrypted tokens (PASETO v4.local).

use std::fmt;

use chrono::Duration;
use rusty_paseto::core::{
    Key, Local, Paseto, PasetoNonce, PasetoSymmetricKey, Payload as PasetoPayload, V4,
};
use tracing::debug;
use zeroize::Zeroize;

use crate::error::{MakerError, TokenError};
use crate::key::{LOCAL_KEY_SIZE, derive_local_key, fill_random};
use crate::maker::Maker;
use crate::payload::Payload;

/// Nonce size for v4.local.
const NONCE_SIZE: usize = 32;

/// Header of every token this maker issues.
const HEADER: &str = "v4.local.";

/// Issues and verifies v4.local tokens.
///
/// The payload is encrypted and authenticated under the shared key; holders
/// of a token see nothing but the version header and ciphertext.
#[derive(Clone)]
pub struct PasetoMaker {
    key: [u8; LOCAL_KEY_SIZE],
}

impl fmt::Debug for PasetoMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasetoMaker")
            .field("version", &"v4.local")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl Drop for PasetoMaker {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl PasetoMaker {
    /// Create a maker keyed by `secret_key` (at least 32 bytes).
    pub fn new(secret_key: &str) -> Result<Self, MakerError> {
        let key = derive_local_key(secret_key.as_bytes())?;
        Ok(Self { key })
    }

    fn symmetric_key(&self) -> PasetoSymmetricKey<V4, Local> {
        PasetoSymmetricKey::<V4, Local>::from(Key::from(self.key))
    }
}

impl Maker for PasetoMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), MakerError> {
        let payload = Payload::new(username, duration)?;
        let message =
            serde_json::to_string(&payload).map_err(|e| MakerError::Encoding(e.to_string()))?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        fill_random(&mut nonce_bytes)?;
        let nonce_key = Key::from(nonce_bytes);
        let nonce = PasetoNonce::<V4, Local>::from(&nonce_key);

        let token = Paseto::<V4, Local>::builder()
            .set_payload(PasetoPayload::from(message.as_str()))
            .try_encrypt(&self.symmetric_key(), &nonce)
            .map_err(|e| MakerError::Encoding(e.to_string()))?;
        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        // Footers are never issued; an empty one would still authenticate.
        let has_single_body = token
            .strip_prefix(HEADER)
            .is_some_and(|body| !body.is_empty() && !body.contains('.'));
        if !has_single_body {
            debug!("Rejected PASETO token with unexpected segments");
            return Err(TokenError::InvalidToken);
        }

        // The decryption error stays here; callers only learn the token is bad.
        let message = Paseto::<V4, Local>::try_decrypt(token, &self.symmetric_key(), None, None)
            .map_err(|_| {
                debug!("Rejected PASETO token that failed authenticated decryption");
                TokenError::InvalidToken
            })?;

        let payload: Payload = serde_json::from_str(&message).map_err(|e| {
            debug!(error = %e, "Rejected PASETO token with malformed payload");
            TokenError::InvalidToken
        })?;

        payload.valid().inspect_err(|_| {
            debug!(token_id = %payload.id(), "Rejected expired PASETO token");
        })?;
        Ok(payload)
    }
}
