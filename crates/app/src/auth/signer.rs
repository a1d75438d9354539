//! Keyed HMAC-SHA256 signing of session verifier input.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Shortest accepted signing secret, in bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 8;

/// Signs and verifies session verifiers with the server-side session secret.
#[derive(Clone)]
pub struct TokenSigner {
    key: Zeroizing<Vec<u8>>,
}

impl TokenSigner {
    /// Create a signer from the configured session secret.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::SecretTooShort`] when the secret has fewer than
    /// [`MIN_SESSION_SECRET_LEN`] bytes.
    pub fn new(secret: &str) -> Result<Self, SignerError> {
        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(SignerError::SecretTooShort);
        }

        Ok(Self {
            key: Zeroizing::new(secret.as_bytes().to_vec()),
        })
    }

    /// Compute the base64url HMAC of `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is rejected by the MAC.
    pub fn sign(&self, input: &[u8]) -> Result<String, SignerError> {
        let mut mac = self.mac()?;

        mac.update(input);

        Ok(BASE64_URL.encode(mac.finalize().into_bytes()))
    }

    /// Check `signature` against `input` in constant time.
    ///
    /// A signature that is not valid base64url never verifies.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is rejected by the MAC.
    pub fn verify(&self, input: &[u8], signature: &str) -> Result<bool, SignerError> {
        let Ok(expected) = BASE64_URL.decode(signature) else {
            return Ok(false);
        };

        let mut mac = self.mac()?;

        mac.update(input);

        Ok(mac.verify_slice(&expected).is_ok())
    }

    fn mac(&self) -> Result<HmacSha256, SignerError> {
        HmacSha256::new_from_slice(&self.key).map_err(|_| SignerError::InvalidKey)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSigner(**redacted**)")
    }
}

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("session secret must be at least {MIN_SESSION_SECRET_LEN} bytes")]
    SecretTooShort,

    #[error("session secret was rejected as an HMAC key")]
    InvalidKey,
}
