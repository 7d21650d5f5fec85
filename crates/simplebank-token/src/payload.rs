//! Claims carried inside every token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MakerError, TokenError};
use crate::key::fill_random;

/// Identity and time bounds of one issued token.
///
/// Built once per [`Maker::create_token`](crate::Maker::create_token) call and
/// never mutated afterwards; verification hands back an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    id: Uuid,
    username: String,
    issued_at: DateTime<Utc>,
    expired_at: DateTime<Utc>,
}

impl Payload {
    /// Create a payload for `username` that expires `duration` from now.
    ///
    /// A negative `duration` yields a payload that is already expired.
    pub fn new(username: &str, duration: Duration) -> Result<Self, MakerError> {
        let id = random_id()?;
        let issued_at = Utc::now();
        let expired_at = issued_at
            .checked_add_signed(duration)
            .ok_or(MakerError::DurationOutOfRange)?;

        Ok(Self {
            id,
            username: username.to_string(),
            issued_at,
            expired_at,
        })
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub const fn expired_at(&self) -> DateTime<Utc> {
        self.expired_at
    }

    /// Check the time bounds against the current wall clock.
    pub fn valid(&self) -> Result<(), TokenError> {
        if self.is_expired() {
            return Err(TokenError::ExpiredToken);
        }
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expired_at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        (self.expired_at - Utc::now()).max(Duration::zero())
    }
}

fn random_id() -> Result<Uuid, MakerError> {
    let mut bytes = [0u8; 16];
    fill_random(&mut bytes)?;
    Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
}
