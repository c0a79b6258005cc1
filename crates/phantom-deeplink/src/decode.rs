//! Callback URL parsing
//!
//! Every syntactically valid URL resolves to a [`WalletResponse`] value;
//! the decoder never returns an error. Malformed or tampered callbacks
//! surface as [`WalletResponse::OperationFailed`] with a reason the caller
//! can branch on.

use tracing::{debug, warn};
use url::Url;
use wallet_crypto::{CryptoError, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE, decrypt_payload};

use crate::{FailureReason, USER_REJECTED_CODE, WalletConfig, WalletOperation, WalletResponse};

/// Keys needed to open encrypted callback payloads.
///
/// `local_secret_key` is the dapp keypair's secret half from the connect
/// handshake; `wallet_public_key` is the wallet's encryption key returned
/// in the connect response.
#[derive(Clone)]
pub struct SessionKeys {
    pub local_secret_key: [u8; SECRET_KEY_SIZE],
    pub wallet_public_key: [u8; PUBLIC_KEY_SIZE],
}

/// Parses wallet redirect URLs into typed outcomes
#[derive(Debug, Clone)]
pub struct ResponseDecoder {
    callback_scheme: String,
    callback_host: Option<String>,
}

impl ResponseDecoder {
    /// Build a decoder matching the configuration's redirect base
    pub fn new(config: &WalletConfig) -> Self {
        let base = config.redirect_base_url();
        Self {
            callback_scheme: base.scheme().to_owned(),
            callback_host: base.host_str().map(str::to_owned),
        }
    }

    /// Whether `url` targets this decoder's callback prefix.
    ///
    /// Matches on scheme and host only; pure and infallible.
    pub fn can_handle(&self, url: &Url) -> bool {
        url.scheme() == self.callback_scheme
            && url.host_str() == self.callback_host.as_deref()
    }

    /// Parse a callback URL into its typed outcome.
    ///
    /// `session_keys` is required only for operations whose response data
    /// is encrypted (everything except connect and disconnect).
    pub fn parse(&self, url: &Url, session_keys: Option<&SessionKeys>) -> WalletResponse {
        let suffix = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("");

        let Some(operation) = WalletOperation::from_callback_suffix(suffix) else {
            debug!(path = url.path(), "unrecognized callback path");
            return WalletResponse::Unknown;
        };
        debug!(?operation, "handling wallet callback");

        if let Some(reason) = wallet_reported_failure(url) {
            warn!(?operation, ?reason, "wallet reported failure");
            return WalletResponse::OperationFailed { operation, reason };
        }

        match operation {
            WalletOperation::Connect => parse_connect(url),
            WalletOperation::Disconnect => WalletResponse::Disconnected,
            WalletOperation::SignAndSendTransaction => {
                parse_encrypted(url, operation, session_keys, "signature")
            }
            WalletOperation::SignTransaction => {
                parse_encrypted(url, operation, session_keys, "transaction")
            }
            WalletOperation::SignMessage => {
                parse_encrypted(url, operation, session_keys, "signature")
            }
            // No outbound request exists, so no callback can either
            WalletOperation::SignAllTransactions => WalletResponse::Unknown,
        }
    }
}

/// Single query parameter by name, if present
fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// Classify an `errorCode`/`errorMessage` pair if the wallet sent one
fn wallet_reported_failure(url: &Url) -> Option<FailureReason> {
    let code = query_param(url, "errorCode")?;
    if code == USER_REJECTED_CODE {
        return Some(FailureReason::UserRejected);
    }
    Some(FailureReason::WalletError {
        code,
        message: query_param(url, "errorMessage").unwrap_or_default(),
    })
}

/// Connect success carries its fields as plaintext query parameters
fn parse_connect(url: &Url) -> WalletResponse {
    let fields = (
        query_param(url, "public_key"),
        query_param(url, "phantom_encryption_public_key"),
        query_param(url, "session"),
    );
    match fields {
        (Some(public_key), Some(wallet_encryption_key), Some(session)) => {
            WalletResponse::Connected {
                public_key,
                wallet_encryption_key,
                session,
            }
        }
        _ => WalletResponse::OperationFailed {
            operation: WalletOperation::Connect,
            reason: FailureReason::InvalidResponse,
        },
    }
}

/// Decrypt the `data` field and pull out the expected response field
fn parse_encrypted(
    url: &Url,
    operation: WalletOperation,
    session_keys: Option<&SessionKeys>,
    expected_field: &str,
) -> WalletResponse {
    let failed = |reason| WalletResponse::OperationFailed { operation, reason };

    let (Some(data), Some(nonce)) = (query_param(url, "data"), query_param(url, "nonce")) else {
        return failed(FailureReason::InvalidResponse);
    };
    let Some(keys) = session_keys else {
        return failed(FailureReason::MissingSessionKeys);
    };

    let decrypted = match decrypt_payload(
        &data,
        &nonce,
        &keys.wallet_public_key,
        &keys.local_secret_key,
    ) {
        Ok(value) => value,
        Err(e) => {
            warn!(?operation, error = %e, "could not open callback payload");
            return failed(classify_crypto_error(e));
        }
    };

    let Some(value) = decrypted.get(expected_field).and_then(|v| v.as_str()) else {
        return failed(FailureReason::InvalidResponse);
    };
    let value = value.to_owned();

    match operation {
        WalletOperation::SignAndSendTransaction => WalletResponse::SignedAndSent { signature: value },
        WalletOperation::SignTransaction => WalletResponse::SignedTransaction { transaction: value },
        WalletOperation::SignMessage => WalletResponse::SignedMessage { signature: value },
        _ => failed(FailureReason::InvalidResponse),
    }
}

fn classify_crypto_error(error: CryptoError) -> FailureReason {
    match error {
        CryptoError::MalformedEncoding(_) | CryptoError::InvalidNonceLength { .. } => {
            FailureReason::MalformedEncoding
        }
        _ => FailureReason::DecryptionFailed,
    }
}
