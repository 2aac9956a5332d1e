//! Field-level encryption at rest.
//!
//! Mirrors `backend/storage/encryption.py`'s `DataEncryption`: a single key
//! derived via PBKDF2-SHA256 (or supplied directly), used to encrypt a
//! closed set of sensitive fields before they ever reach the `SessionStore`'s
//! map. Decryption is "best effort, pass through on failure" -- a value that
//! isn't recognized as our own ciphertext is returned unchanged rather than
//! erroring, so the store tolerates plaintext fixtures and pre-encryption
//! data without special-casing them.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chacha20poly1305::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    ChaCha20Poly1305, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::config::{CipherConfig, KeySource};

const KDF_ITERATIONS: u32 = 100_000;
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
/// Prefix marking a value as our own ciphertext, so decrypt can tell it
/// apart from plaintext and pass the latter through untouched.
const MAGIC_PREFIX: &str = "gre1:";

/// The set of session/event fields that are encrypted at rest. Matches the
/// sensitive-key list in `backend/storage/memory.py:142-144`.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "email",
    "emails",
    "phone",
    "phones",
    "phone_number",
    "phone_number_formatted",
    "caller_id",
    "from",
    "to",
    "user_id",
    "device_id",
    "account_number",
    "ssn",
];

pub fn is_sensitive_field(name: &str) -> bool {
    SENSITIVE_FIELDS.contains(&name)
}

/// AEAD cipher over a single derived or supplied key.
pub struct PayloadCipher {
    enabled: bool,
    cipher: Option<ChaCha20Poly1305>,
}

impl PayloadCipher {
    pub fn from_config(config: &CipherConfig) -> Self {
        if !config.enabled {
            return Self {
                enabled: false,
                cipher: None,
            };
        }

        let key = match &config.key_source {
            KeySource::Direct(encoded) => derive_from_direct(encoded),
            KeySource::Derived { password, salt } => derive_from_password(password, salt),
        };

        let cipher = ChaCha20Poly1305::new_from_slice(key.as_slice())
            .expect("derived key is always 32 bytes");

        Self {
            enabled: true,
            cipher: Some(cipher),
        }
    }

    /// Encrypts `plaintext`, returning a base64 token prefixed with
    /// `MAGIC_PREFIX`. Falls back to the plaintext unchanged if encryption
    /// is disabled or fails -- this is data-at-rest hygiene, not a
    /// transport guarantee, so a failure here must never block a request.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let Some(cipher) = self.enabled.then_some(()).and(self.cipher.as_ref()) else {
            return plaintext.to_string();
        };

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);


        match cipher.encrypt(nonce, plaintext.as_bytes()) {
            Ok(ciphertext) => {
                let mut combined = Vec::with_capacity(NONCE_LEN + ciphertext.len());
                combined.extend_from_slice(&nonce_bytes);
                combined.extend_from_slice(&ciphertext);
                format!("{MAGIC_PREFIX}{}", URL_SAFE_NO_PAD.encode(combined))
            }
            Err(err) => {
                tracing::warn!(error = %err, "field encryption failed, storing plaintext");
                plaintext.to_string()
            }
        }
    }

    /// Decrypts a value produced by `encrypt`. Anything not carrying our
    /// magic prefix -- plaintext, or data from before encryption was
    /// enabled -- is returned unchanged.
    pub fn decrypt(&self, value: &str) -> String {
        let Some(token) = value.strip_prefix(MAGIC_PREFIX) else {
            return value.to_string();
        };
        let Some(cipher) = self.cipher.as_ref() else {
            return value.to_string();
        };

        let decoded = match URL_SAFE_NO_PAD.decode(token) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "field decryption: bad base64, passing through");
                return value.to_string();
            }
        };
        if decoded.len() < NONCE_LEN {
            tracing::warn!("field decryption: truncated payload, passing through");
            return value.to_string();
        }
        let (nonce_bytes, ciphertext) = decoded.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        match cipher.decrypt(nonce, ciphertext) {
            Ok(plaintext) => String::from_utf8(plaintext).unwrap_or_else(|_| value.to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "field decryption failed, passing through");
                value.to_string()
            }
        }
    }
}

fn derive_from_direct(encoded: &str) -> Zeroizing<Vec<u8>> {
    match URL_SAFE_NO_PAD.decode(encoded) {
        Ok(bytes) if bytes.len() == KEY_LEN => Zeroizing::new(bytes),
        _ => derive_from_password(encoded, "guardian-direct-key-salt"),
    }
}

fn derive_from_password(password: &str, salt: &str) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), KDF_ITERATIONS, &mut key);
    key
}
