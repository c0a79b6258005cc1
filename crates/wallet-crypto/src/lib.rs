//! Wallet Crypto - End-to-End Encryption for Wallet Deeplinks
//!
//! Provides X25519 key exchange with XSalsa20-Poly1305 box encryption of
//! URL-transportable JSON payloads, base58-encoded.

mod cipher;
mod error;
mod keypair;
mod payload;

pub use cipher::*;
pub use error::*;
pub use keypair::*;
pub use payload::*;

/// Nonce size for XSalsa20-Poly1305 (192 bits / 24 bytes)
pub const NONCE_SIZE: usize = 24;

/// Authentication tag size (128 bits / 16 bytes)
pub const TAG_SIZE: usize = 16;

/// Public key size (256 bits / 32 bytes)
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Secret key size (256 bits / 32 bytes)
pub const SECRET_KEY_SIZE: usize = 32;
