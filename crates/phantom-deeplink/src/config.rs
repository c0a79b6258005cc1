//! Validated session configuration

use url::Url;

use crate::{DeeplinkError, DeeplinkResult};

/// Connection settings shared by every wallet operation.
///
/// Construction validates all fields up front, so holding a `WalletConfig`
/// means the client is fully configured. The value is immutable afterwards;
/// build a new one to change settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    app_url: String,
    cluster: String,
    redirect_base_url: Url,
}

impl WalletConfig {
    /// Validate and build a configuration.
    ///
    /// `app_url` is the dapp URL shown to the user inside the wallet,
    /// `cluster` names the target network (e.g. `mainnet-beta`), and
    /// `redirect_base_url` is the prefix the wallet redirects back to,
    /// ending with `/` so callback suffixes can be appended directly.
    pub fn new(
        app_url: impl Into<String>,
        cluster: impl Into<String>,
        redirect_base_url: &str,
    ) -> DeeplinkResult<Self> {
        let app_url = app_url.into();
        let cluster = cluster.into();

        if app_url.is_empty() {
            return Err(DeeplinkError::InvalidConfiguration(
                "app_url must not be empty".into(),
            ));
        }
        if cluster.is_empty() {
            return Err(DeeplinkError::InvalidConfiguration(
                "cluster must not be empty".into(),
            ));
        }
        Url::parse(&app_url).map_err(|e| {
            DeeplinkError::InvalidConfiguration(format!("app_url is not a valid URL: {e}"))
        })?;
        let redirect_base_url = Url::parse(redirect_base_url).map_err(|e| {
            DeeplinkError::InvalidConfiguration(format!(
                "redirect_base_url is not a valid URL: {e}"
            ))
        })?;
        // Callback suffixes are appended directly, so the base must be a
        // bare prefix ending in a slash
        if !redirect_base_url.path().ends_with('/') {
            return Err(DeeplinkError::InvalidConfiguration(
                "redirect_base_url must end with '/'".into(),
            ));
        }
        if redirect_base_url.query().is_some() || redirect_base_url.fragment().is_some() {
            return Err(DeeplinkError::InvalidConfiguration(
                "redirect_base_url must not carry a query or fragment".into(),
            ));
        }

        Ok(Self {
            app_url,
            cluster,
            redirect_base_url,
        })
    }

    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn redirect_base_url(&self) -> &Url {
        &self.redirect_base_url
    }

    /// Full redirect target for one callback suffix
    pub fn redirect_link(&self, suffix: &str) -> String {
        format!("{}{}", self.redirect_base_url, suffix)
    }
}
