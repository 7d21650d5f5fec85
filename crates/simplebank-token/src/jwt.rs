//! Signed-claims tokens (JWT, HS256).

use std::fmt;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::error::{MakerError, TokenError};
use crate::key::check_key_size;
use crate::maker::Maker;
use crate::payload::Payload;

/// The only algorithm this maker signs with or accepts.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and verifies HMAC-signed JWTs.
///
/// The payload travels as readable claims; integrity comes from the
/// signature alone.
#[derive(Clone)]
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtMaker")
            .field("algorithm", &ALGORITHM)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl JwtMaker {
    /// Create a maker keyed by `secret_key` (at least 32 bytes).
    pub fn new(secret_key: &str) -> Result<Self, MakerError> {
        let secret = secret_key.as_bytes();
        check_key_size(secret)?;

        // Expiry is judged by `Payload::valid`, not by registered claims.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }
}

impl Maker for JwtMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), MakerError> {
        let payload = Payload::new(username, duration)?;
        let token = jsonwebtoken::encode(&Header::new(ALGORITHM), &payload, &self.encoding_key)
            .map_err(|e| MakerError::Encoding(e.to_string()))?;
        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            debug!(error = %e, "Rejected JWT with unreadable header");
            TokenError::InvalidToken
        })?;

        // Must fail before any signature work.
        if header.alg != ALGORITHM {
            debug!(alg = ?header.alg, "Rejected JWT with unexpected algorithm");
            return Err(TokenError::InvalidToken);
        }

        let data = jsonwebtoken::decode::<Payload>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Rejected JWT");
                TokenError::InvalidToken
            })?;

        let payload = data.claims;
        payload.valid().inspect_err(|_| {
            debug!(token_id = %payload.id(), "Rejected expired JWT");
        })?;
        Ok(payload)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    const KEY: &str = "test-secret-key-for-testing-0123";

    fn test_maker() -> JwtMaker {
        JwtMaker::new(KEY).unwrap()
    }

    fn b64_json(value: &impl serde::Serialize) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn create_and_verify() {
        let maker = test_maker();
        let (token, issued) = maker.create_token("alice", Duration::minutes(1)).unwrap();

        assert_eq!(token.split('.').count(), 3);
        let payload = maker.verify_token(&token).unwrap();
        assert_eq!(payload, issued);
        assert_eq!(payload.username(), "alice");
    }

    #[test]
    fn header_names_hs256() {
        let maker = test_maker();
        let (token, _) = maker.create_token("alice", Duration::minutes(1)).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn claims_are_readable_without_the_key() {
        let maker = test_maker();
        let (token, issued) = maker.create_token("alice", Duration::minutes(1)).unwrap();

        let claims = token.split('.').nth(1).unwrap();
        let decoded: Payload =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(claims).unwrap()).unwrap();
        assert_eq!(decoded, issued);
    }

    #[test]
    fn expired_token_rejected() {
        let maker = test_maker();
        let (token, _) = maker.create_token("alice", -Duration::minutes(1)).unwrap();
        assert_eq!(maker.verify_token(&token), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn none_algorithm_rejected() {
        let maker = test_maker();
        let payload = Payload::new("alice", Duration::minutes(1)).unwrap();

        let header = serde_json::json!({ "alg": "none", "typ": "JWT" });
        let token = format!("{}.{}.", b64_json(&header), b64_json(&payload));

        assert_eq!(maker.verify_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn other_hmac_algorithm_rejected_even_with_right_key() {
        let maker = test_maker();
        let payload = Payload::new("alice", Duration::minutes(1)).unwrap();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS384),
            &payload,
            &EncodingKey::from_secret(KEY.as_bytes()),
        )
        .unwrap();

        assert_eq!(maker.verify_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn tampered_claims_rejected() {
        let maker = test_maker();
        let (token, _) = maker.create_token("alice", Duration::minutes(1)).unwrap();
        let forged = Payload::new("mallory", Duration::minutes(1)).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let token = format!("{}.{}.{}", parts[0], b64_json(&forged), parts[2]);

        assert_eq!(maker.verify_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn trailing_character_rejected() {
        let maker = test_maker();
        let (token, _) = maker.create_token("alice", Duration::minutes(1)).unwrap();
        assert_eq!(
            maker.verify_token(&format!("{token} ")),
            Err(TokenError::InvalidToken)
        );
    }

    #[test]
    fn wrong_secret_rejected() {
        let maker = test_maker();
        let other = JwtMaker::new("another-secret-key-for-testing-99").unwrap();
        let (token, _) = maker.create_token("alice", Duration::minutes(1)).unwrap();
        assert_eq!(other.verify_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn garbage_rejected() {
        let maker = test_maker();
        for input in ["", "not-a-valid-token", "a.b.c", "...."] {
            assert_eq!(maker.verify_token(input), Err(TokenError::InvalidToken));
        }
    }

    #[test]
    fn signed_claims_of_wrong_shape_rejected() {
        let maker = test_maker();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "sub": "alice", "exp": 4_102_444_800_i64 }),
            &EncodingKey::from_secret(KEY.as_bytes()),
        )
        .unwrap();

        assert_eq!(maker.verify_token(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn short_key_rejected() {
        let err = JwtMaker::new("too-short").unwrap_err();
        assert!(matches!(
            err,
            MakerError::InvalidKeySize { min: 32, actual: 9 }
        ));
    }

    #[test]
    fn debug_impl_redacts_secret() {
        let debug_output = format!("{:?}", test_maker());
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(KEY));
    }
}
