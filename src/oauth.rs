use oauth2::{
    AccessToken, AuthType, AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
    RedirectUrl, RefreshToken, TokenResponse, TokenUrl,
    basic::{BasicClient, BasicTokenResponse, BasicTokenType},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    config::Config,
    error::{Error, Result},
    utils::date_format::datetime_option,
};

/// OAuth 2 client with both the authorize and the token endpoint configured.
pub type OAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Builds the OAuth client for `config`. Client credentials travel in the request
/// body, which is what the Parasut token endpoint expects.
pub(crate) fn build_oauth_client(config: &Config) -> Result<OAuthClient> {
    let auth_url = AuthUrl::new(config.auth_url.clone())
        .map_err(|_| Error::InvalidEndpoint(config.auth_url.clone()))?;
    let token_url = TokenUrl::new(config.token_url.clone())
        .map_err(|_| Error::InvalidEndpoint(config.token_url.clone()))?;

    let client = BasicClient::new(ClientId::new(config.client_id.clone()))
        .set_client_secret(ClientSecret::new(config.client_secret.clone()))
        .set_auth_type(AuthType::RequestBody)
        .set_auth_uri(auth_url)
        .set_token_uri(token_url);

    if config.redirect_url.is_empty() {
        return Ok(client);
    }
    let redirect_url = RedirectUrl::new(config.redirect_url.clone())
        .map_err(|_| Error::InvalidEndpoint(config.redirect_url.clone()))?;
    Ok(client.set_redirect_uri(redirect_url))
}

/// A bearer token held by the client.
///
/// Tokens live in memory only. They serialize with serde so callers can persist them
/// and hand them back through [`Client::set_token`](crate::Client::set_token).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub access_token: AccessToken,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<RefreshToken>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<OffsetDateTime>,
}

impl Token {
    /// A bearer token with no refresh token and no known expiry.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::new(access_token.into()),
            token_type: "Bearer".to_string(),
            refresh_token: None,
            expires_at: None,
        }
    }

    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(RefreshToken::new(refresh_token.into()));
        self
    }

    #[must_use]
    pub fn with_expires_at(mut self, expires_at: OffsetDateTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// The raw access token string.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.access_token.secret()
    }

    /// Whether the token is past its expiry. Tokens without an expiry never expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= OffsetDateTime::now_utc())
    }

    pub(crate) fn from_response(response: &BasicTokenResponse) -> Self {
        let token_type = match response.token_type() {
            BasicTokenType::Bearer => "Bearer".to_string(),
            BasicTokenType::Mac => "MAC".to_string(),
            BasicTokenType::Extension(name) => name.clone(),
        };
        Self {
            access_token: response.access_token().clone(),
            token_type,
            refresh_token: response.refresh_token().cloned(),
            expires_at: response
                .expires_in()
                .map(|expires_in| OffsetDateTime::now_utc() + expires_in),
        }
    }
}
