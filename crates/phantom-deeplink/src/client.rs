//! Protocol client tying config, cipher and URL builders together

use tracing::debug;
use url::Url;
use wallet_crypto::{KeyPair, OrderedPayload, encrypt_payload};

use crate::{
    DeeplinkError, DeeplinkResult, ResponseDecoder, WalletConfig, encode,
};

/// Client for the wallet's deeplink provider methods.
///
/// Each method returns the composed universal link; dispatching it to the
/// wallet application and waiting for the redirect are the caller's job.
/// Holding a client implies a validated [`WalletConfig`], so there is no
/// unconfigured state to check at call time.
///
/// Payload field order is fixed per operation (see each method) because the
/// canonical JSON form must match byte-for-byte on both ends.
#[derive(Debug, Clone)]
pub struct PhantomClient {
    config: WalletConfig,
    version: Option<String>,
}

impl PhantomClient {
    pub fn new(config: WalletConfig) -> Self {
        Self {
            config,
            version: None,
        }
    }

    /// Use a deeplink API version other than the default `v1`
    pub fn with_version(config: WalletConfig, version: impl Into<String>) -> Self {
        Self {
            config,
            version: Some(version.into()),
        }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Decoder matching this client's redirect base, for wiring deep-link
    /// delivery straight to `can_handle`/`parse`
    pub fn decoder(&self) -> ResponseDecoder {
        ResponseDecoder::new(&self.config)
    }

    /// Build the connect request.
    ///
    /// The caller generates `keypair` fresh for this connection and keeps
    /// it for the whole session; the engine never holds onto it.
    pub fn connect(&self, keypair: &KeyPair) -> DeeplinkResult<Url> {
        debug!("building connect deeplink");
        encode::connect_url(&self.config, &keypair.public_key_base58(), self.version())
    }

    /// Build the disconnect request. Payload: `{"session"}`.
    pub fn disconnect(
        &self,
        keypair: &KeyPair,
        wallet_public_key: &[u8],
        session: &str,
    ) -> DeeplinkResult<Url> {
        let payload = OrderedPayload::new().field("session", session);
        let sealed = encrypt_payload(&payload, wallet_public_key, &keypair.secret_key_bytes())?;
        encode::disconnect_url(
            &self.config,
            &keypair.public_key_base58(),
            &sealed.nonce,
            &sealed.ciphertext,
            self.version(),
        )
    }

    /// Build the sign-and-send request for a base58-serialized transaction.
    /// Payload: `{"session", "transaction"}`.
    pub fn sign_and_send_transaction(
        &self,
        keypair: &KeyPair,
        wallet_public_key: &[u8],
        session: &str,
        transaction58: &str,
    ) -> DeeplinkResult<Url> {
        let payload = OrderedPayload::new()
            .field("session", session)
            .field("transaction", transaction58);
        let sealed = encrypt_payload(&payload, wallet_public_key, &keypair.secret_key_bytes())?;
        encode::sign_and_send_transaction_url(
            &self.config,
            &keypair.public_key_base58(),
            &sealed.nonce,
            &sealed.ciphertext,
            self.version(),
        )
    }

    /// Build the sign-transaction request; the wallet returns the signed
    /// transaction for the dapp to submit itself.
    /// Payload: `{"transaction", "session"}`.
    pub fn sign_transaction(
        &self,
        keypair: &KeyPair,
        wallet_public_key: &[u8],
        session: &str,
        transaction58: &str,
    ) -> DeeplinkResult<Url> {
        let payload = OrderedPayload::new()
            .field("transaction", transaction58)
            .field("session", session);
        let sealed = encrypt_payload(&payload, wallet_public_key, &keypair.secret_key_bytes())?;
        encode::sign_transaction_url(
            &self.config,
            &keypair.public_key_base58(),
            &sealed.nonce,
            &sealed.ciphertext,
            self.version(),
        )
    }

    /// Build the sign-message request for a base58-encoded message.
    /// Payload: `{"session", "message"}`.
    pub fn sign_message(
        &self,
        keypair: &KeyPair,
        wallet_public_key: &[u8],
        session: &str,
        message58: &str,
    ) -> DeeplinkResult<Url> {
        let payload = OrderedPayload::new()
            .field("session", session)
            .field("message", message58);
        let sealed = encrypt_payload(&payload, wallet_public_key, &keypair.secret_key_bytes())?;
        encode::sign_message_url(
            &self.config,
            &keypair.public_key_base58(),
            &sealed.nonce,
            &sealed.ciphertext,
            self.version(),
        )
    }

    /// Not offered by the wallet's deeplink API; always fails so callers
    /// treat it as unavailable rather than silently skipped.
    pub fn sign_all_transactions(&self) -> DeeplinkResult<Url> {
        Err(DeeplinkError::UnsupportedOperation("signAllTransactions"))
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureReason, SessionKeys, WalletOperation, WalletResponse};
    use wallet_crypto::decrypt_payload;

    fn client() -> PhantomClient {
        let config =
            WalletConfig::new("https://example.app", "mainnet-beta", "https://example.app/")
                .unwrap();
        PhantomClient::new(config)
    }

    #[test]
    fn test_connect_requires_valid_configuration() {
        let result = WalletConfig::new("", "mainnet-beta", "https://example.app/");
        assert!(matches!(result, Err(DeeplinkError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_connect_url_contains_exactly_four_params() {
        let keypair = KeyPair::generate().unwrap();
        let url = client().connect(&keypair).unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(
            pairs[0],
            ("app_url".to_string(), "https://example.app".to_string())
        );
        assert_eq!(
            pairs[1],
            (
                "dapp_encryption_public_key".to_string(),
                keypair.public_key_base58()
            )
        );
        assert_eq!(
            pairs[2],
            (
                "redirect_link".to_string(),
                "https://example.app/phantom_connect".to_string()
            )
        );
        assert_eq!(
            pairs[3],
            ("cluster".to_string(), "mainnet-beta".to_string())
        );
    }

    #[test]
    fn test_sign_all_transactions_is_unsupported() {
        let result = client().sign_all_transactions();
        assert!(matches!(
            result,
            Err(DeeplinkError::UnsupportedOperation("signAllTransactions"))
        ));
    }

    #[test]
    fn test_disconnect_payload_opens_wallet_side() {
        let dapp = KeyPair::generate().unwrap();
        let wallet = KeyPair::generate().unwrap();

        let url = client()
            .disconnect(&dapp, &wallet.public_key_bytes(), "sess-1")
            .unwrap();

        let get = |name: &str| {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
                .unwrap()
        };
        let opened = decrypt_payload(
            &get("payload"),
            &get("nonce"),
            &dapp.public_key_bytes(),
            &wallet.secret_key_bytes(),
        )
        .unwrap();
        assert_eq!(opened["session"], "sess-1");
    }

    #[test]
    fn test_sign_transaction_request_and_response_flow() {
        let dapp = KeyPair::generate().unwrap();
        let wallet = KeyPair::generate().unwrap();
        let client = client();

        let url = client
            .sign_transaction(&dapp, &wallet.public_key_bytes(), "sess-1", "3TxBytes")
            .unwrap();
        assert_eq!(url.path(), "/ul/v1/signTransaction");

        // Wallet opens the request payload
        let get = |name: &str| {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
                .unwrap()
        };
        let request = decrypt_payload(
            &get("payload"),
            &get("nonce"),
            &dapp.public_key_bytes(),
            &wallet.secret_key_bytes(),
        )
        .unwrap();
        assert_eq!(request["transaction"], "3TxBytes");
        assert_eq!(request["session"], "sess-1");

        // Wallet answers with the signed transaction, encrypted back
        let reply = wallet_crypto::encrypt_payload(
            &wallet_crypto::OrderedPayload::new().field("transaction", "3TxSigned"),
            &dapp.public_key_bytes(),
            &wallet.secret_key_bytes(),
        )
        .unwrap();
        let callback = Url::parse(&format!(
            "https://example.app/phantom_sign_transaction?data={}&nonce={}",
            reply.ciphertext, reply.nonce
        ))
        .unwrap();

        let decoder = client.decoder();
        assert!(decoder.can_handle(&callback));
        let keys = SessionKeys {
            local_secret_key: dapp.secret_key_bytes(),
            wallet_public_key: wallet.public_key_bytes(),
        };
        assert_eq!(
            decoder.parse(&callback, Some(&keys)),
            WalletResponse::SignedTransaction {
                transaction: "3TxSigned".into()
            }
        );
    }

    #[test]
    fn test_rejected_sign_message_round_trip() {
        let client = client();
        let callback =
            Url::parse("https://example.app/phantom_sign_message?errorCode=4001").unwrap();
        assert_eq!(
            client.decoder().parse(&callback, None),
            WalletResponse::OperationFailed {
                operation: WalletOperation::SignMessage,
                reason: FailureReason::UserRejected,
            }
        );
    }
}
