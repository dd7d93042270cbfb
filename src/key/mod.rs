//! Public key resolution for strong-name signed assemblies.
//!
//! The generator only needs two strings from a signing key: the hex public
//! key and its public key token. [`KeySource`] is the seam; resolution
//! failures never abort generation, they just omit both fields.

pub mod snk;

use serde::Serialize;

use crate::core::request::KeyReference;

pub use snk::{
    public_key_token, read_key_file, strong_name_public_key, KeyError, StrongNameKeySource,
};

/// Public key material derived from a signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    /// Strong-name public key, lower-case hex.
    pub public_key: String,
    /// Public key token, lower-case hex (16 characters).
    pub public_key_token: String,
}

impl KeyInfo {
    /// Derive key info from a strong-name public key blob.
    pub fn from_public_key(public_key: &[u8]) -> Self {
        KeyInfo {
            public_key: hex::encode(public_key),
            public_key_token: hex::encode(public_key_token(public_key)),
        }
    }
}

/// Resolves a key reference to public key material.
///
/// Implementations return `None` whenever the key is unavailable for any
/// reason. Callers treat that as "omit the key fields".
pub trait KeySource {
    fn resolve(&self, key: &KeyReference) -> Option<KeyInfo>;
}

/// A key source that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeySource;

impl KeySource for NoKeySource {
    fn resolve(&self, _key: &KeyReference) -> Option<KeyInfo> {
        None
    }
}
