use magshelf_core::{Email, IdentityProvider, IdentityProviderError, ProviderProfile};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// Where the authorization-code flow talks to. Overridable for tests.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub authorize: String,
    pub token: String,
    pub userinfo: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            authorize: "https://accounts.google.com/o/oauth2/v2/auth".to_owned(),
            token: "https://oauth2.googleapis.com/token".to_owned(),
            userinfo: "https://www.googleapis.com/oauth2/v2/userinfo".to_owned(),
        }
    }
}

pub struct GoogleIdentityProvider {
    http_client: Client,
    client_id: String,
    client_secret: Secret<String>,
    redirect_url: String,
    endpoints: GoogleEndpoints,
}

impl GoogleIdentityProvider {
    pub fn new(
        client_id: String,
        client_secret: Secret<String>,
        redirect_url: String,
        http_client: Client,
    ) -> Self {
        Self::with_endpoints(
            client_id,
            client_secret,
            redirect_url,
            http_client,
            GoogleEndpoints::default(),
        )
    }

    pub fn with_endpoints(
        client_id: String,
        client_secret: Secret<String>,
        redirect_url: String,
        http_client: Client,
        endpoints: GoogleEndpoints,
    ) -> Self {
        Self {
            http_client,
            client_id,
            client_secret,
            redirect_url,
            endpoints,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    id: String,
    email: Option<String>,
    name: Option<String>,
}

#[async_trait::async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        match Url::parse_with_params(
            &self.endpoints.authorize,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        ) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::error!(error = %e, "invalid google authorize endpoint");
                self.endpoints.authorize.clone()
            }
        }
    }

    #[tracing::instrument(name = "Exchanging google authorization code", skip_all)]
    async fn exchange_code(&self, code: &str) -> Result<ProviderProfile, IdentityProviderError> {
        let token: TokenResponse = self
            .http_client
            .post(&self.endpoints.token)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret().as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| IdentityProviderError::Exchange(e.to_string()))?
            .error_for_status()
            .map_err(|e| IdentityProviderError::Exchange(e.to_string()))?
            .json()
            .await
            .map_err(|e| IdentityProviderError::Exchange(e.to_string()))?;

        let info: UserInfo = self
            .http_client
            .get(&self.endpoints.userinfo)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| IdentityProviderError::Profile(e.to_string()))?
            .error_for_status()
            .map_err(|e| IdentityProviderError::Profile(e.to_string()))?
            .json()
            .await
            .map_err(|e| IdentityProviderError::Profile(e.to_string()))?;

        Ok(ProviderProfile {
            id: info.id,
            email: info.email.and_then(|raw| Email::try_from(raw).ok()),
            name: info.name,
        })
    }
}
