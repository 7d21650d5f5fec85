//! `simplebank` token library
//!
//! Issues and verifies the bearer credentials that prove a client's identity
//! without server-side session storage.
//!
//! ## Schemes
//!
//! - **JWT**: HS256 signed claims, readable by anyone, forgeable by no one without the key
//! - **PASETO**: v4.local authenticated encryption, opaque to everyone but the key holder
//!
//! Both implement [`Maker`]; callers pick one at startup with [`new_maker`].

pub mod bearer;
pub mod error;
pub mod jwt;
pub mod key;
pub mod maker;
pub mod paseto;
pub mod payload;

pub use bearer::{AUTHORIZATION_HEADER, AuthorizationError, authorize, bearer_header};
pub use error::{MakerError, TokenError};
pub use jwt::JwtMaker;
pub use key::MIN_SECRET_KEY_SIZE;
pub use maker::{Maker, TokenScheme, new_maker};
pub use paseto::PasetoMaker;
pub use payload::Payload;
