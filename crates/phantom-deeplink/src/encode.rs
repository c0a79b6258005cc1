//! Outbound universal-link construction
//!
//! Query parameter order follows the wallet's documented examples per
//! operation and is kept stable so fixtures can compare URLs literally.

use url::Url;

use crate::{DEEPLINK_VERSION, DeeplinkResult, PHANTOM_BASE_URL, WalletConfig, WalletOperation};

/// Compose `<base>/ul/<version>/<operation>?<params>` with the parameters
/// percent-encoded and appended in the given order.
pub fn format_url(
    operation: WalletOperation,
    version: &str,
    params: &[(&str, &str)],
) -> DeeplinkResult<Url> {
    let base = Url::parse(PHANTOM_BASE_URL)?;
    let mut url = base.join(&format!("ul/{}/{}", version, operation.request_path()))?;
    {
        let mut query = url.query_pairs_mut();
        for (name, value) in params {
            query.append_pair(name, value);
        }
    }
    Ok(url)
}

/// Connect request: the only operation that carries no encrypted payload
pub fn connect_url(
    config: &WalletConfig,
    dapp_public_key58: &str,
    version: Option<&str>,
) -> DeeplinkResult<Url> {
    let operation = WalletOperation::Connect;
    format_url(
        operation,
        version.unwrap_or(DEEPLINK_VERSION),
        &[
            ("app_url", config.app_url()),
            ("dapp_encryption_public_key", dapp_public_key58),
            (
                "redirect_link",
                &config.redirect_link(operation.callback_suffix()),
            ),
            ("cluster", config.cluster()),
        ],
    )
}

pub fn disconnect_url(
    config: &WalletConfig,
    dapp_public_key58: &str,
    nonce58: &str,
    payload58: &str,
    version: Option<&str>,
) -> DeeplinkResult<Url> {
    encrypted_operation_url(
        config,
        WalletOperation::Disconnect,
        dapp_public_key58,
        nonce58,
        payload58,
        version,
    )
}

pub fn sign_and_send_transaction_url(
    config: &WalletConfig,
    dapp_public_key58: &str,
    nonce58: &str,
    payload58: &str,
    version: Option<&str>,
) -> DeeplinkResult<Url> {
    encrypted_operation_url(
        config,
        WalletOperation::SignAndSendTransaction,
        dapp_public_key58,
        nonce58,
        payload58,
        version,
    )
}

/// signTransaction places `nonce` before `redirect_link`, unlike the other
/// encrypted operations
pub fn sign_transaction_url(
    config: &WalletConfig,
    dapp_public_key58: &str,
    nonce58: &str,
    payload58: &str,
    version: Option<&str>,
) -> DeeplinkResult<Url> {
    let operation = WalletOperation::SignTransaction;
    format_url(
        operation,
        version.unwrap_or(DEEPLINK_VERSION),
        &[
            ("dapp_encryption_public_key", dapp_public_key58),
            ("nonce", nonce58),
            (
                "redirect_link",
                &config.redirect_link(operation.callback_suffix()),
            ),
            ("payload", payload58),
        ],
    )
}

pub fn sign_message_url(
    config: &WalletConfig,
    dapp_public_key58: &str,
    nonce58: &str,
    payload58: &str,
    version: Option<&str>,
) -> DeeplinkResult<Url> {
    encrypted_operation_url(
        config,
        WalletOperation::SignMessage,
        dapp_public_key58,
        nonce58,
        payload58,
        version,
    )
}

/// Shared shape of disconnect, signAndSendTransaction and signMessage
fn encrypted_operation_url(
    config: &WalletConfig,
    operation: WalletOperation,
    dapp_public_key58: &str,
    nonce58: &str,
    payload58: &str,
    version: Option<&str>,
) -> DeeplinkResult<Url> {
    format_url(
        operation,
        version.unwrap_or(DEEPLINK_VERSION),
        &[
            ("dapp_encryption_public_key", dapp_public_key58),
            (
                "redirect_link",
                &config.redirect_link(operation.callback_suffix()),
            ),
            ("nonce", nonce58),
            ("payload", payload58),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WalletConfig {
        WalletConfig::new("https://example.app", "mainnet-beta", "https://example.app/").unwrap()
    }

    #[test]
    fn test_connect_url_shape() {
        let url = connect_url(&config(), "BfY8Nqm", None).unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("phantom.app"));
        assert_eq!(url.path(), "/ul/v1/connect");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("app_url".to_string(), "https://example.app".to_string()),
                ("dapp_encryption_public_key".to_string(), "BfY8Nqm".to_string()),
                (
                    "redirect_link".to_string(),
                    "https://example.app/phantom_connect".to_string()
                ),
                ("cluster".to_string(), "mainnet-beta".to_string()),
            ]
        );
    }

    #[test]
    fn test_redirect_link_is_percent_encoded() {
        let url = connect_url(&config(), "BfY8Nqm", None).unwrap();
        assert!(
            url.query()
                .unwrap()
                .contains("redirect_link=https%3A%2F%2Fexample.app%2Fphantom_connect")
        );
    }

    #[test]
    fn test_version_override() {
        let url = connect_url(&config(), "BfY8Nqm", Some("v2")).unwrap();
        assert_eq!(url.path(), "/ul/v2/connect");
    }

    #[test]
    fn test_sign_transaction_param_order() {
        let url = sign_transaction_url(&config(), "dappKey", "nonce58", "payload58", None).unwrap();
        assert_eq!(url.path(), "/ul/v1/signTransaction");

        let names: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(
            names,
            vec!["dapp_encryption_public_key", "nonce", "redirect_link", "payload"]
        );
    }

    #[test]
    fn test_encrypted_operations_param_order() {
        for (url, path, suffix) in [
            (
                disconnect_url(&config(), "k", "n", "p", None).unwrap(),
                "/ul/v1/disconnect",
                "phantom_disconnect",
            ),
            (
                sign_and_send_transaction_url(&config(), "k", "n", "p", None).unwrap(),
                "/ul/v1/signAndSendTransaction",
                "phantom_sign_and_send_transaction",
            ),
            (
                sign_message_url(&config(), "k", "n", "p", None).unwrap(),
                "/ul/v1/signMessage",
                "phantom_sign_message",
            ),
        ] {
            assert_eq!(url.path(), path);

            let pairs: Vec<(String, String)> = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            assert_eq!(
                pairs,
                vec![
                    ("dapp_encryption_public_key".to_string(), "k".to_string()),
                    (
                        "redirect_link".to_string(),
                        format!("https://example.app/{suffix}")
                    ),
                    ("nonce".to_string(), "n".to_string()),
                    ("payload".to_string(), "p".to_string()),
                ]
            );
        }
    }
}
