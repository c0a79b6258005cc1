//! Phantom Deeplink - Encrypted Wallet Control Channel over Universal Links
//!
//! This crate builds the outbound deeplink URLs for the Phantom wallet's
//! provider methods and parses the redirect URLs the wallet sends back.
//! Payloads are end-to-end encrypted with the key exchange and box cipher
//! from `wallet-crypto`; the host application performs the actual URL
//! dispatch and hands callback URLs to the [`ResponseDecoder`].

mod client;
mod config;
mod decode;
mod encode;
mod error;
mod response;

pub use client::*;
pub use config::*;
pub use decode::*;
pub use encode::*;
pub use error::*;
pub use response::*;

/// Universal-link base of the wallet application
pub const PHANTOM_BASE_URL: &str = "https://phantom.app/";

/// Deeplink API version used when none is given
pub const DEEPLINK_VERSION: &str = "v1";

/// Error code the wallet returns when the user declines a request
pub const USER_REJECTED_CODE: &str = "4001";
