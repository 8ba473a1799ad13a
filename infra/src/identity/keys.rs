//! Application private key loading

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::EncodingKey;

use crate::InfrastructureError;

/// RS256 signing key for application JWTs
#[derive(Clone)]
pub struct ApplicationKey {
    encoding_key: EncodingKey,
    /// Where the key was loaded from, if it came from a file
    source: Option<PathBuf>,
}

impl std::fmt::Debug for ApplicationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationKey")
            .field("source", &self.source)
            .finish()
    }
}

impl ApplicationKey {
    /// Reads a PEM-encoded RSA private key (PKCS#1 or PKCS#8) from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InfrastructureError> {
        let path = path.as_ref();
        let pem = fs::read(path).map_err(|e| {
            InfrastructureError::Key(format!(
                "Failed to read private key {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut key = Self::from_pem(&pem)?;
        key.source = Some(path.to_path_buf());
        Ok(key)
    }

    /// Parses a PEM-encoded RSA private key
    pub fn from_pem(pem: &[u8]) -> Result<Self, InfrastructureError> {
        let encoding_key = EncodingKey::from_rsa_pem(pem)
            .map_err(|e| InfrastructureError::Key(format!("Invalid private key format: {}", e)))?;

        Ok(Self {
            encoding_key,
            source: None,
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}
