//! OAuth 1.0 request signing and verification (RFC 5849).
//!
//! This crate provides the protocol core used by the Mambo SDK:
//!
//! - [`SignedRequest`] builds the canonical signature base string and
//!   serializes signed requests as headers, post data or URLs
//! - [`SignatureMethod`] implementations: [`HmacSha1`], [`Plaintext`], [`RsaSha1`]
//! - [`OAuthServer`] verifies inbound requests and issues tokens through a
//!   host-provided [`DataStore`]
//! - [`MemoryStore`] for tests and single-process tools (behind the
//!   `memory-store` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use mambo_oauth::{Consumer, HmacSha1, SignedRequest};
//!
//! let consumer = Consumer::new("public-key", "private-key");
//! let mut request = SignedRequest::from_consumer_and_token(
//!     &consumer,
//!     None,
//!     "GET",
//!     "https://api.mambo.io/v1/acme/users",
//! );
//! request.sign(&HmacSha1, &consumer, None)?;
//! let header = request.authorization_header(None);
//! ```

mod encode;
mod error;
mod key;
#[cfg(any(test, feature = "memory-store"))]
mod memory;
mod model;
mod request;
mod server;
mod signature;
mod store;

pub use encode::{decode, encode, parse_authorization_header, parse_pairs};
pub use error::{OAuthError, RsaKeyError, StoreError};
pub use key::{load_private_key, load_public_key};
#[cfg(any(test, feature = "memory-store"))]
pub use memory::MemoryStore;
pub use model::{Consumer, Token, TokenKind};
pub use request::{
    OAUTH_CALLBACK, OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD,
    OAUTH_TIMESTAMP, OAUTH_TOKEN, OAUTH_VERIFIER, OAUTH_VERSION, OAUTH_VERSION_PARAM,
    SignedRequest, generate_nonce, unix_now,
};
pub use server::{DEFAULT_TIMESTAMP_THRESHOLD, OAuthServer};
pub use signature::{
    HmacSha1, Plaintext, RsaSha1, SignatureMethod, SignatureMethods, constant_time_eq,
};
pub use store::DataStore;
