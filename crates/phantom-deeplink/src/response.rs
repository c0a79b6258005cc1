//! Typed callback outcomes

use serde::{Deserialize, Serialize};

/// Wallet provider method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletOperation {
    Connect,
    Disconnect,
    SignAndSendTransaction,
    SignTransaction,
    SignMessage,
    SignAllTransactions,
}

impl WalletOperation {
    /// Path segment in the outbound universal link
    pub fn request_path(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::SignAndSendTransaction => "signAndSendTransaction",
            Self::SignTransaction => "signTransaction",
            Self::SignMessage => "signMessage",
            Self::SignAllTransactions => "signAllTransactions",
        }
    }

    /// Suffix appended to the redirect base for this operation's callback
    pub fn callback_suffix(&self) -> &'static str {
        match self {
            Self::Connect => "phantom_connect",
            Self::Disconnect => "phantom_disconnect",
            Self::SignAndSendTransaction => "phantom_sign_and_send_transaction",
            Self::SignTransaction => "phantom_sign_transaction",
            Self::SignMessage => "phantom_sign_message",
            // Never issued: the operation is not supported outbound
            Self::SignAllTransactions => "phantom_sign_all_transactions",
        }
    }

    /// Map a callback path segment back to its operation
    pub fn from_callback_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "phantom_connect" => Some(Self::Connect),
            "phantom_disconnect" => Some(Self::Disconnect),
            "phantom_sign_and_send_transaction" => Some(Self::SignAndSendTransaction),
            "phantom_sign_transaction" => Some(Self::SignTransaction),
            "phantom_sign_message" => Some(Self::SignMessage),
            _ => None,
        }
    }
}

/// Why a wallet operation did not produce a success outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// The user declined the request in the wallet
    UserRejected,
    /// The wallet reported an error other than user rejection
    WalletError { code: String, message: String },
    /// The callback carried encrypted data but no session keys were supplied
    MissingSessionKeys,
    /// A base58 field or the nonce in the callback could not be decoded
    MalformedEncoding,
    /// The encrypted payload failed authentication or was not valid JSON
    DecryptionFailed,
    /// The callback had a success shape but required fields were missing
    InvalidResponse,
}

/// Parsed wallet callback.
///
/// Produced only by the response decoder; every syntactically valid
/// callback URL maps to exactly one of these, failures included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletResponse {
    /// Wallet approved the connection and issued a session token
    Connected {
        /// User's wallet address, base58
        public_key: String,
        /// Wallet-side Curve25519 public key for the shared secret
        wallet_encryption_key: String,
        /// Session token scoping subsequent requests
        session: String,
    },
    /// Wallet acknowledged the disconnect
    Disconnected,
    /// Transaction was signed and submitted by the wallet
    SignedAndSent { signature: String },
    /// Transaction was signed and returned for the dapp to submit
    SignedTransaction { transaction: String },
    /// Message was signed
    SignedMessage { signature: String },
    /// The operation did not complete
    OperationFailed {
        operation: WalletOperation,
        reason: FailureReason,
    },
    /// Callback path did not match any known operation
    Unknown,
}
