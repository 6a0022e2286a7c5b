use std::sync::Arc;

use magshelf_core::{
    AccountStore, EmailClient, FileStorage, IdentityProvider, MagazineStore,
    PasswordHasher, SessionStore,
};

use crate::{
    auth::{JwtConfig, RequestAuthenticator, SessionCookieConfig},
    config::Settings,
};

/// Port implementations the routes run against.
pub struct Adapters {
    pub account_store: Arc<dyn AccountStore>,
    pub magazine_store: Arc<dyn MagazineStore>,
    pub session_store: Arc<dyn SessionStore>,
    pub email_client: Arc<dyn EmailClient>,
    pub file_storage: Arc<dyn FileStorage>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub password_hasher: Arc<dyn PasswordHasher>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub session_cookie: SessionCookieConfig,
    /// Frontend origin the Google callback redirects back to.
    pub client_url: String,
}

impl AppConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            jwt: JwtConfig {
                jwt_secret: settings.auth.jwt_secret.clone(),
                token_ttl_in_seconds: settings.auth.token_ttl_seconds,
            },
            session_cookie: SessionCookieConfig {
                secure: settings.app.is_production(),
                ttl_in_seconds: settings.auth.session_ttl_seconds,
            },
            client_url: settings.app.client_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_cookie.ttl_in_seconds)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub account_store: Arc<dyn AccountStore>,
    pub magazine_store: Arc<dyn MagazineStore>,
    pub session_store: Arc<dyn SessionStore>,
    pub email_client: Arc<dyn EmailClient>,
    pub file_storage: Arc<dyn FileStorage>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub authenticator: RequestAuthenticator,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(adapters: Adapters, config: AppConfig) -> Self {
        let authenticator = RequestAuthenticator::new(
            adapters.account_store.clone(),
            adapters.session_store.clone(),
        );

        Self {
            account_store: adapters.account_store,
            magazine_store: adapters.magazine_store,
            session_store: adapters.session_store,
            email_client: adapters.email_client,
            file_storage: adapters.file_storage,
            identity_provider: adapters.identity_provider,
            password_hasher: adapters.password_hasher,
            authenticator,
            config,
        }
    }
}
