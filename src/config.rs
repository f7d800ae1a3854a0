use std::time::Duration;

pub const BASE_URL: &str = "https://api.parasut.com/v4";
pub const AUTH_URL: &str = "https://api.parasut.com/oauth/authorize";
pub const TOKEN_URL: &str = "https://api.parasut.com/oauth/token";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a [`Client`](crate::Client).
///
/// The OAuth credentials and the company id are required. The endpoint URLs and the
/// request timeout default to the production API and can be overridden, which is
/// mostly useful for sandboxes and mock servers.
#[derive(Clone)]
pub struct Config {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) redirect_url: String,
    pub(crate) company_id: u64,
    pub(crate) base_url: String,
    pub(crate) auth_url: String,
    pub(crate) token_url: String,
    pub(crate) timeout: Duration,
}

impl Config {
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
        company_id: u64,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
            company_id,
            base_url: BASE_URL.to_string(),
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API root that company scoped paths are appended to.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self
    }

    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Set the timeout applied to every request, token exchanges included.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    #[must_use]
    pub fn company_id(&self) -> u64 {
        self.company_id
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_url", &self.redirect_url)
            .field("company_id", &self.company_id)
            .field("base_url", &self.base_url)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = Config::new("id", "secret", "urn:ietf:wg:oauth:2.0:oob", 123);
        assert_eq!(config.base_url(), BASE_URL);
        assert_eq!(config.company_id(), 123);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let config = Config::new("id", "secret", "", 1).with_base_url("http://127.0.0.1:9000/v4/");
        assert_eq!(config.base_url(), "http://127.0.0.1:9000/v4");
    }

    #[test]
    fn debug_redacts_secret() {
        let config = Config::new("id", "top-secret", "", 1);
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}
