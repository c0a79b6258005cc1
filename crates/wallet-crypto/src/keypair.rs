//! Ephemeral Curve25519 key pairs for deeplink sessions

use rand::RngCore;
use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::{CryptoError, CryptoResult, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};

/// Key pair for deriving a shared secret with the wallet.
///
/// Generated fresh per connection attempt and owned by the caller for the
/// lifetime of the session. The secret key is zeroed on drop; the engine
/// never retains a copy between calls.
pub struct KeyPair {
    secret: StaticSecret,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new key pair from the OS random source.
    ///
    /// Fails only if the underlying random source is unavailable.
    pub fn generate() -> CryptoResult<Self> {
        let mut bytes = Zeroizing::new([0u8; SECRET_KEY_SIZE]);
        OsRng
            .try_fill_bytes(bytes.as_mut_slice())
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;

        let secret = StaticSecret::from(*bytes);
        let public = PublicKey::from(&secret);
        Ok(Self { secret, public })
    }

    /// Get the public key bytes
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        *self.public.as_bytes()
    }

    /// Get the secret key bytes
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.secret.to_bytes()
    }

    /// Public key in the base58 form carried in request URLs
    pub fn public_key_base58(&self) -> String {
        bs58::encode(self.public.as_bytes()).into_string()
    }
}
