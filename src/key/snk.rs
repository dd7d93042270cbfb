//! Strong-name key file (`.snk`) reader.
//!
//! Accepted inputs:
//! - a key pair (`PRIVATEKEYBLOB`, as written by `sn -k`)
//! - a bare `PUBLICKEYBLOB`
//! - a strong-name public key (`sn -p` output): 12-byte signature header
//!   followed by a `PUBLICKEYBLOB`

use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::core::request::KeyReference;
use crate::key::{KeyInfo, KeySource};

const PUBLICKEYBLOB: u8 = 0x06;
const PRIVATEKEYBLOB: u8 = 0x07;
const CUR_BLOB_VERSION: u8 = 0x02;

const CALG_RSA_SIGN: u32 = 0x0000_2400;
const CALG_SHA1: u32 = 0x0000_8004;

const MAGIC_RSA1: u32 = 0x3141_5352;
const MAGIC_RSA2: u32 = 0x3241_5352;

/// BLOBHEADER + RSAPUBKEY
const BLOB_PREFIX_LEN: usize = 20;
const SIGNATURE_HEADER_LEN: usize = 12;

/// Error reading a strong-name key.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("failed to read key file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("key blob is truncated ({len} bytes)")]
    Truncated { len: usize },

    #[error("unsupported key blob type 0x{0:02x}")]
    UnsupportedBlob(u8),

    #[error("unexpected RSA key magic 0x{0:08x}")]
    BadMagic(u32),
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, KeyError> {
    bytes
        .get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(KeyError::Truncated { len: bytes.len() })
}

/// Wrap a `PUBLICKEYBLOB` in the strong-name signature header.
fn wrap_public_blob(blob: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(SIGNATURE_HEADER_LEN + blob.len());
    key.extend_from_slice(&CALG_RSA_SIGN.to_le_bytes());
    key.extend_from_slice(&CALG_SHA1.to_le_bytes());
    key.extend_from_slice(&(blob.len() as u32).to_le_bytes());
    key.extend_from_slice(blob);
    key
}

/// Build a `PUBLICKEYBLOB` from the public half of an RSA key.
fn public_blob(bit_len: u32, pub_exp: u32, modulus: &[u8]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(BLOB_PREFIX_LEN + modulus.len());
    blob.extend_from_slice(&[PUBLICKEYBLOB, CUR_BLOB_VERSION, 0, 0]);
    blob.extend_from_slice(&CALG_RSA_SIGN.to_le_bytes());
    blob.extend_from_slice(&MAGIC_RSA1.to_le_bytes());
    blob.extend_from_slice(&bit_len.to_le_bytes());
    blob.extend_from_slice(&pub_exp.to_le_bytes());
    blob.extend_from_slice(modulus);
    blob
}

/// Extract the strong-name public key from the contents of a key file.
pub fn strong_name_public_key(bytes: &[u8]) -> Result<Vec<u8>, KeyError> {
    let Some(&blob_type) = bytes.first() else {
        return Err(KeyError::Truncated { len: 0 });
    };

    match blob_type {
        PRIVATEKEYBLOB => {
            let magic = read_u32(bytes, 8)?;
            if magic != MAGIC_RSA2 {
                return Err(KeyError::BadMagic(magic));
            }
            let bit_len = read_u32(bytes, 12)?;
            let pub_exp = read_u32(bytes, 16)?;
            let modulus_len = (bit_len / 8) as usize;
            let modulus = bytes
                .get(BLOB_PREFIX_LEN..BLOB_PREFIX_LEN + modulus_len)
                .ok_or(KeyError::Truncated { len: bytes.len() })?;
            Ok(wrap_public_blob(&public_blob(bit_len, pub_exp, modulus)))
        }
        PUBLICKEYBLOB => {
            let magic = read_u32(bytes, 8)?;
            if magic != MAGIC_RSA1 {
                return Err(KeyError::BadMagic(magic));
            }
            if bytes.len() < BLOB_PREFIX_LEN {
                return Err(KeyError::Truncated { len: bytes.len() });
            }
            Ok(wrap_public_blob(bytes))
        }
        _ => {
            // Already a strong-name public key: signature header, then the blob.
            match bytes.get(SIGNATURE_HEADER_LEN) {
                Some(&PUBLICKEYBLOB) => {
                    let declared = read_u32(bytes, 8)? as usize;
                    if bytes.len() < SIGNATURE_HEADER_LEN + declared {
                        return Err(KeyError::Truncated { len: bytes.len() });
                    }
                    Ok(bytes[..SIGNATURE_HEADER_LEN + declared].to_vec())
                }
                _ => Err(KeyError::UnsupportedBlob(blob_type)),
            }
        }
    }
}

/// Compute the 8-byte public key token: the last 8 bytes of the SHA-1 hash,
/// in reverse order.
pub fn public_key_token(public_key: &[u8]) -> [u8; 8] {
    let digest = Sha1::digest(public_key);
    let mut token = [0u8; 8];
    for (i, byte) in digest.iter().rev().take(8).enumerate() {
        token[i] = *byte;
    }
    token
}

/// Read a key file and derive its public key info.
pub fn read_key_file(path: &Path) -> Result<KeyInfo, KeyError> {
    let bytes = std::fs::read(path).map_err(|source| KeyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let public_key = strong_name_public_key(&bytes)?;
    Ok(KeyInfo::from_public_key(&public_key))
}

/// [`KeySource`] backed by strong-name key files on disk.
///
/// Key containers live in a platform crypto store this tool does not access,
/// so container references always resolve to `None`.
#[derive(Debug, Clone, Default)]
pub struct StrongNameKeySource {
    base_dir: Option<PathBuf>,
}

impl StrongNameKeySource {
    pub fn new() -> Self {
        StrongNameKeySource { base_dir: None }
    }

    /// Resolve relative key paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn key_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl KeySource for StrongNameKeySource {
    fn resolve(&self, key: &KeyReference) -> Option<KeyInfo> {
        match key {
            KeyReference::File(path) => {
                let path = self.key_path(path);
                match read_key_file(&path) {
                    Ok(info) => Some(info),
                    Err(KeyError::Io { path, source }) => {
                        tracing::debug!("key file {} unavailable: {}", path.display(), source);
                        None
                    }
                    Err(e) => {
                        tracing::warn!("ignoring key file {}: {}", path.display(), e);
                        None
                    }
                }
            }
            KeyReference::Container(name) => {
                tracing::debug!("key container `{}` is not supported, omitting key fields", name);
                None
            }
        }
    }
}
