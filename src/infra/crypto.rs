//! Secret sealing for values registered in the configuration table.
//!
//! The deployed scan engine decrypts with AES-256-ECB + PKCS7 + base64,
//! so the sealed format here must match exactly.

use aes::Aes256;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use anyhow::Result;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::application::ports::SecretSealer;
use crate::domain::config::AES_SECRET_LEN;
use crate::domain::error::ConfigError;

const BLOCK: usize = 16;

/// AES-256-ECB sealer keyed by the install's `aes_secret`.
pub struct AesEcbSealer {
    cipher: Aes256,
}

impl AesEcbSealer {
    /// # Errors
    ///
    /// Returns `ConfigError::BadAesSecretLength` unless the key is
    /// exactly 32 bytes.
    pub fn new(key: &str) -> Result<Self, ConfigError> {
        if key.len() != AES_SECRET_LEN {
            return Err(ConfigError::BadAesSecretLength { len: key.len() });
        }
        let cipher = Aes256::new(GenericArray::from_slice(key.as_bytes()));
        Ok(Self { cipher })
    }
}

impl SecretSealer for AesEcbSealer {
    fn seal(&self, plaintext: &str) -> Result<String> {
        let plain = plaintext.as_bytes();
        // PKCS7: aligned input still gets a full padding block.
        let padding = BLOCK - plain.len() % BLOCK;
        let mut buf = Vec::with_capacity(plain.len() + padding);
        buf.extend_from_slice(plain);
        buf.resize(plain.len() + padding, u8::try_from(padding)?);

        for chunk in buf.chunks_mut(BLOCK) {
            self.cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
        }
        Ok(STANDARD.encode(&buf))
    }
}
