//! The contract every token scheme implements.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{MakerError, TokenError};
use crate::jwt::JwtMaker;
use crate::paseto::PasetoMaker;
use crate::payload::Payload;

/// Issues and verifies bearer tokens.
///
/// Implementations hold nothing but immutable key material, so one instance
/// can be shared across threads without locking.
pub trait Maker: Send + Sync {
    /// Mint a token for `username` valid for `duration`.
    ///
    /// Returns the token together with the payload embedded in it.
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), MakerError>;

    /// Authenticate `token`, decode its payload and check expiry.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}

/// Which token scheme a deployment issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScheme {
    Jwt,
    #[default]
    Paseto,
}

impl TokenScheme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jwt => "jwt",
            Self::Paseto => "paseto",
        }
    }
}

impl fmt::Display for TokenScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jwt" => Ok(Self::Jwt),
            "paseto" => Ok(Self::Paseto),
            other => Err(format!(
                "unknown token scheme: {other} (expected jwt or paseto)"
            )),
        }
    }
}

/// Build the maker for `scheme` keyed by `secret_key`.
pub fn new_maker(scheme: TokenScheme, secret_key: &str) -> Result<Box<dyn Maker>, MakerError> {
    let maker: Box<dyn Maker> = match scheme {
        TokenScheme::Jwt => Box::new(JwtMaker::new(secret_key)?),
        TokenScheme::Paseto => Box::new(PasetoMaker::new(secret_key)?),
    };
    info!(scheme = %scheme, "Token maker ready");
    Ok(maker)
}
