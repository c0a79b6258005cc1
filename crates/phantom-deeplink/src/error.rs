//! Deeplink error types

use thiserror::Error;
use wallet_crypto::CryptoError;

/// Deeplink construction error
#[derive(Debug, Error)]
pub enum DeeplinkError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("URL construction failed: {0}")]
    UrlConstruction(#[from] url::ParseError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Operation not supported: {0}")]
    UnsupportedOperation(&'static str),
}

pub type DeeplinkResult<T> = Result<T, DeeplinkError>;
