//! Shared-secret payload encryption with X25519 + XSalsa20-Poly1305
//!
//! The dapp and the wallet each hold a Curve25519 key pair; X25519 over one
//! side's secret key and the other side's public key yields the same shared
//! secret in both directions. Payloads ride in URLs, so ciphertext and nonce
//! are base58-encoded separately.

use crypto_box::SalsaBox;
use crypto_box::aead::{Aead, AeadCore, OsRng};
use tracing::{debug, warn};

use crate::{
    CryptoError, CryptoResult, NONCE_SIZE, OrderedPayload, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE,
    TAG_SIZE,
};

/// Encrypted payload as carried in URL query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Base58-encoded ciphertext (includes the 16-byte authentication tag)
    pub ciphertext: String,
    /// Base58-encoded 24-byte nonce
    pub nonce: String,
}

/// Encrypt a payload for the wallet.
///
/// Serializes `payload` to its canonical JSON form, derives the shared
/// secret from `local_secret_key` and `wallet_public_key`, and seals the
/// bytes under a nonce drawn fresh from the OS random source. Nonce reuse
/// under one key pair breaks the construction, so the nonce is never
/// supplied by the caller.
pub fn encrypt_payload(
    payload: &OrderedPayload,
    wallet_public_key: &[u8],
    local_secret_key: &[u8],
) -> CryptoResult<EncryptedPayload> {
    let shared = shared_box(wallet_public_key, local_secret_key)?;
    let plaintext = payload.to_canonical_json()?;

    let nonce = SalsaBox::generate_nonce(&mut OsRng);
    let ciphertext = shared
        .encrypt(&nonce, plaintext.as_slice())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    debug!(fields = payload.len(), "encrypted deeplink payload");

    Ok(EncryptedPayload {
        ciphertext: bs58::encode(ciphertext).into_string(),
        nonce: bs58::encode(nonce).into_string(),
    })
}

/// Decrypt a payload received from the wallet.
///
/// Reverses [`encrypt_payload`] with the key roles swapped: the wallet
/// encrypted with its secret key and our public key, so we open with our
/// secret key and the wallet's public key. Returns the decrypted JSON
/// object.
pub fn decrypt_payload(
    ciphertext58: &str,
    nonce58: &str,
    wallet_public_key: &[u8],
    local_secret_key: &[u8],
) -> CryptoResult<serde_json::Value> {
    let ciphertext = bs58::decode(ciphertext58)
        .into_vec()
        .map_err(|e| CryptoError::MalformedEncoding(e.to_string()))?;
    let nonce_bytes = bs58::decode(nonce58)
        .into_vec()
        .map_err(|e| CryptoError::MalformedEncoding(e.to_string()))?;

    let nonce: [u8; NONCE_SIZE] =
        nonce_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidNonceLength {
                expected: NONCE_SIZE,
                actual: nonce_bytes.len(),
            })?;

    // Anything shorter than the tag cannot be a sealed box
    if ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::MalformedEncoding(format!(
            "ciphertext too short: {} bytes, tag alone is {TAG_SIZE}",
            ciphertext.len()
        )));
    }

    let shared = shared_box(wallet_public_key, local_secret_key)?;
    let plaintext = shared
        .decrypt(&nonce.into(), ciphertext.as_slice())
        .map_err(|_| {
            warn!("deeplink payload failed authentication");
            CryptoError::DecryptionFailed
        })?;

    serde_json::from_slice(&plaintext).map_err(|_| CryptoError::DecryptionFailed)
}

/// Derive the shared-secret box from raw key bytes.
///
/// The shared secret lives only for this call; nothing is cached.
fn shared_box(wallet_public_key: &[u8], local_secret_key: &[u8]) -> CryptoResult<SalsaBox> {
    let public: [u8; PUBLIC_KEY_SIZE] =
        wallet_public_key
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: wallet_public_key.len(),
            })?;
    let secret: [u8; SECRET_KEY_SIZE] =
        local_secret_key
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: SECRET_KEY_SIZE,
                actual: local_secret_key.len(),
            })?;

    Ok(SalsaBox::new(
        &crypto_box::PublicKey::from(public),
        &crypto_box::SecretKey::from(secret),
    ))
}
