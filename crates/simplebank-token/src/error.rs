//! Token error types.

/// Why a token was rejected by [`Maker::verify_token`](crate::Maker::verify_token).
///
/// Deliberately coarse: callers learn that a token is unusable, never which
/// check it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,
}

/// Errors from building a maker or minting a token.
///
/// These are setup faults, not properties of a presented token.
#[derive(Debug, thiserror::Error)]
pub enum MakerError {
    #[error("Invalid key size: must be at least {min} bytes, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Random source failure: {0}")]
    RandomSource(String),

    #[error("Token lifetime out of range")]
    DurationOutOfRange,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_error_messages_do_not_leak_detail() {
        assert_eq!(TokenError::InvalidToken.to_string(), "token is invalid");
        assert_eq!(TokenError::ExpiredToken.to_string(), "token has expired");
    }

    #[test]
    fn key_size_error_reports_lengths() {
        let err = MakerError::InvalidKeySize { min: 32, actual: 7 };
        let msg = err.to_string();
        assert!(msg.contains("32"));
        assert!(msg.contains('7'));
    }
}
