//! Bearer authorization for incoming requests.
//!
//! Framework-agnostic: the HTTP layer looks up [`AUTHORIZATION_HEADER`], hands
//! over the raw value and gets back the verified payload or a reason to answer
//! 401.

use crate::error::TokenError;
use crate::maker::Maker;
use crate::payload::Payload;

/// Header carrying the credential, lowercase as HTTP/2 transmits it.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// The only supported authorization type (matched case-insensitively).
pub const BEARER: &str = "bearer";

/// Why a request could not be authorized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("authorization header is not provided")]
    MissingHeader,

    #[error("invalid authorization header format")]
    InvalidFormat,

    #[error("unsupported authorization type {0}")]
    UnsupportedType(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthorizationError {
    /// HTTP status for the response.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingHeader
            | Self::InvalidFormat
            | Self::UnsupportedType(_)
            | Self::Token(_) => 401,
        }
    }
}

/// Verify the credential in an [`AUTHORIZATION_HEADER`] value.
pub fn authorize(maker: &dyn Maker, header: Option<&str>) -> Result<Payload, AuthorizationError> {
    let header = header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(AuthorizationError::MissingHeader)?;

    let mut fields = header.split_whitespace();
    let (Some(kind), Some(token)) = (fields.next(), fields.next()) else {
        return Err(AuthorizationError::InvalidFormat);
    };

    if !kind.eq_ignore_ascii_case(BEARER) {
        return Err(AuthorizationError::UnsupportedType(kind.to_string()));
    }

    Ok(maker.verify_token(token)?)
}

/// Format `token` as an [`AUTHORIZATION_HEADER`] value.
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}
