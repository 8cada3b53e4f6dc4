//! Verify-only RSA key material.
//!
//! This crate never signs tokens, so only the public half of the issuer's key
//! pair is ever loaded.
use std::{fmt, path::Path, sync::Arc};

use jsonwebtoken::DecodingKey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("failed to read public key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid RSA public key PEM: {0}")]
    Pem(#[from] jsonwebtoken::errors::Error),
}

/// RSA public key used to check RS256 signatures.
#[derive(Clone)]
pub struct RsaPublicKey {
    decoding_key: DecodingKey,
}

impl fmt::Debug for RsaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("RsaPublicKey").finish_non_exhaustive()
    }
}

impl RsaPublicKey {
    /// Accepts both `BEGIN PUBLIC KEY` and `BEGIN RSA PUBLIC KEY` encodings.
    pub fn from_pem(pem: &[u8]) -> Result<Self, KeyError> {
        let decoding_key = DecodingKey::from_rsa_pem(pem)?;
        Ok(Self { decoding_key })
    }

    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|source| KeyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_pem(&pem)
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

/// Supplies the key the authenticator verifies against.
pub trait PublicKeySource: Send + Sync {
    fn public_key(&self) -> &RsaPublicKey;
}

impl PublicKeySource for RsaPublicKey {
    fn public_key(&self) -> &RsaPublicKey {
        self
    }
}

impl<T: PublicKeySource + ?Sized> PublicKeySource for Arc<T> {
    fn public_key(&self) -> &RsaPublicKey {
        (**self).public_key()
    }
}
