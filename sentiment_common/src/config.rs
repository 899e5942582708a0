//! Upstream provider configuration.
//!
//! Configuration is an explicit value handed to whatever performs a fetch. Nothing in the
//! workspace keeps credentials in a module-level singleton.
use log::warn;
use std::fmt;
use std::time::Duration;

/// Default upstream base URL (sandbox environment).
pub const DEFAULT_BASE_URL: &str = "https://clientapi_sandbox.portfoliopersonal.com";
/// Default request timeout for upstream fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "PORTFOLIO_PERSONAL_API_URL";
/// Environment variable overriding the request timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "PORTFOLIO_PERSONAL_TIMEOUT_SECS";
/// Environment variable for the `AuthorizedClient` credential.
pub const ENV_AUTHORIZED_CLIENT: &str = "PORTFOLIO_PERSONAL_AUTHORIZED_CLIENT";
/// Environment variable for the `ClientKey` credential.
pub const ENV_CLIENT_KEY: &str = "PORTFOLIO_PERSONAL_CLIENT_KEY";
/// Environment variable for the `ApiKey` credential.
pub const ENV_API_KEY: &str = "PORTFOLIO_PERSONAL_API_KEY";
/// Environment variable for the `ApiSecret` credential.
pub const ENV_API_SECRET: &str = "PORTFOLIO_PERSONAL_API_SECRET";

/// Authentication headers expected by the upstream market-data API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// `AuthorizedClient` header value.
    pub authorized_client: String,
    /// `ClientKey` header value.
    pub client_key: String,
    /// `ApiKey` header value.
    pub api_key: String,
    /// `ApiSecret` header value.
    pub api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("authorized_client", &self.authorized_client)
            .field("client_key", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Settings for the upstream market-data provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API base URL.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Credentials, present only when all four parts are configured.
    pub credentials: Option<Credentials>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
        }
    }
}

impl ProviderConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as missing. A timeout that is not a positive whole number of
    /// seconds is ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let credentials = match (
            get(ENV_AUTHORIZED_CLIENT),
            get(ENV_CLIENT_KEY),
            get(ENV_API_KEY),
            get(ENV_API_SECRET),
        ) {
            (Some(authorized_client), Some(client_key), Some(api_key), Some(api_secret)) => {
                Some(Credentials {
                    authorized_client,
                    client_key,
                    api_key,
                    api_secret,
                })
            }
            _ => None,
        };

        let timeout = match get(ENV_TIMEOUT_SECS).map(|raw| raw.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                warn!("Ignoring invalid {ENV_TIMEOUT_SECS}, using {DEFAULT_TIMEOUT:?}");
                DEFAULT_TIMEOUT
            }
            None => DEFAULT_TIMEOUT,
        };

        Self {
            base_url: get(ENV_BASE_URL).unwrap_or_else(|| String::from(DEFAULT_BASE_URL)),
            timeout,
            credentials,
        }
    }

    /// Whether a full credential set is available.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

impl fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (timeout {}s, credentials {})",
            self.base_url,
            self.timeout.as_secs(),
            if self.has_credentials() { "configured" } else { "missing" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ProviderConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ProviderConfig::default());
        assert!(!config.has_credentials());
    }

    #[test]
    fn requires_all_four_credential_parts() {
        let partial = ProviderConfig::from_lookup(lookup(&[
            (ENV_AUTHORIZED_CLIENT, "client"),
            (ENV_CLIENT_KEY, "key"),
            (ENV_API_KEY, "api"),
        ]));
        assert!(partial.credentials.is_none());

        let full = ProviderConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://example.test"),
            (ENV_AUTHORIZED_CLIENT, "client"),
            (ENV_CLIENT_KEY, "key"),
            (ENV_API_KEY, "api"),
            (ENV_API_SECRET, "secret"),
        ]));
        assert_eq!(full.base_url, "https://example.test");
        assert_eq!(
            full.credentials.as_ref().map(|c| c.api_secret.as_str()),
            Some("secret")
        );
    }

    #[test]
    fn timeout_comes_from_environment() {
        let config = ProviderConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, " 30 ")]));
        assert_eq!(config.timeout, Duration::from_secs(30));

        for bad in ["0", "-5", "soon"] {
            let config = ProviderConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, bad)]));
            assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        }
    }

    #[test]
    fn display_summarizes_endpoint_timeout_and_credentials() {
        assert_eq!(
            ProviderConfig::default().to_string(),
            format!("{DEFAULT_BASE_URL} (timeout 10s, credentials missing)")
        );
        let config = ProviderConfig::from_lookup(lookup(&[
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_AUTHORIZED_CLIENT, "client"),
            (ENV_CLIENT_KEY, "key"),
            (ENV_API_KEY, "api"),
            (ENV_API_SECRET, "secret"),
        ]));
        let rendered = config.to_string();
        assert!(rendered.ends_with("(timeout 3s, credentials configured)"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (ENV_AUTHORIZED_CLIENT, "client"),
            (ENV_CLIENT_KEY, "key-123"),
            (ENV_API_KEY, "api-456"),
            (ENV_API_SECRET, "secret-789"),
        ]));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-789"));
        assert!(!rendered.contains("api-456"));
        assert!(rendered.contains("<redacted>"));
    }
}
