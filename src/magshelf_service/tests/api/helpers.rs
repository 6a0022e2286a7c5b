use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use magshelf_adapters::{
    Adapters, AppConfig, AppState,
    auth::{JwtConfig, SessionCookieConfig},
    email::MockEmailClient,
    hashing::Argon2PasswordHasher,
    persistence::{HashMapAccountStore, HashMapMagazineStore, HashMapSessionStore},
    storage::LocalFileStorage,
};
use magshelf_core::{
    Account, AccountStore, Email, IdentityProvider, IdentityProviderError, ProviderProfile,
};
use magshelf_service::MagazineService;
use reqwest::{Client, Response, redirect::Policy};
use secrecy::Secret;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const CLIENT_URL: &str = "http://frontend.test";
pub const PASSWORD: &str = "correct horse battery staple";

/// Google stand-in returning whatever profile the test scripted.
#[derive(Default)]
pub struct ScriptedIdentityProvider {
    profile: RwLock<Option<ProviderProfile>>,
}

impl ScriptedIdentityProvider {
    pub async fn will_return(&self, id: &str, email: Option<&str>, name: Option<&str>) {
        *self.profile.write().await = Some(ProviderProfile {
            id: id.to_owned(),
            email: email.map(|raw| Email::try_from(raw.to_owned()).unwrap()),
            name: name.map(str::to_owned),
        });
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://accounts.test/auth?state={state}")
    }

    async fn exchange_code(&self, _code: &str) -> Result<ProviderProfile, IdentityProviderError> {
        self.profile
            .read()
            .await
            .clone()
            .ok_or_else(|| IdentityProviderError::Exchange("no profile scripted".to_owned()))
    }
}

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub email_client: MockEmailClient,
    pub account_store: HashMapAccountStore,
    pub identity_provider: Arc<ScriptedIdentityProvider>,
    pub uploads_dir: PathBuf,
}

impl TestApp {
    pub async fn new() -> Self {
        let email_client = MockEmailClient::new();
        let account_store = HashMapAccountStore::default();
        let identity_provider = Arc::new(ScriptedIdentityProvider::default());
        let uploads_dir = std::env::temp_dir().join(format!("magshelf-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&uploads_dir).unwrap();

        let listener = TcpListener::bind(magshelf_adapters::config::test::APP_ADDRESS)
            .await
            .unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let adapters = Adapters {
            account_store: Arc::new(account_store.clone()),
            magazine_store: Arc::new(HashMapMagazineStore::default()),
            session_store: Arc::new(HashMapSessionStore::default()),
            email_client: Arc::new(email_client.clone()),
            file_storage: Arc::new(LocalFileStorage::new(&uploads_dir, &address)),
            identity_provider: identity_provider.clone(),
            password_hasher: Arc::new(Argon2PasswordHasher::default()),
        };
        let config = AppConfig {
            jwt: JwtConfig {
                jwt_secret: Secret::new("test-secret".to_owned()),
                token_ttl_in_seconds: 7 * 24 * 60 * 60,
            },
            session_cookie: SessionCookieConfig {
                secure: false,
                ttl_in_seconds: 24 * 60 * 60,
            },
            client_url: CLIENT_URL.to_owned(),
        };

        let service = MagazineService::new(
            AppState::new(adapters, config),
            &uploads_dir,
            uploads_dir.join("assets"),
        );
        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: Self::client(),
            email_client,
            account_store,
            identity_provider,
            uploads_dir,
        }
    }

    /// A fresh cookie jar, i.e. another browser.
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .unwrap()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        client: &Client,
        path: &str,
        body: &B,
    ) -> Response {
        client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, client: &Client, path: &str) -> Response {
        client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn register(&self, email: &str, password: &str) -> Response {
        self.post_json(
            &self.http_client,
            "/auth/register",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn verify(&self, email: &str, otp: &str) -> Response {
        self.post_json(
            &self.http_client,
            "/auth/verify-otp",
            &json!({ "email": email, "otp": otp }),
        )
        .await
    }

    pub async fn login(&self, client: &Client, email: &str, password: &str) -> Response {
        self.post_json(
            client,
            "/auth/login",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    /// The six-digit code from the latest mail sent to `email`.
    pub async fn last_code_for(&self, email: &str) -> String {
        let mail = self
            .email_client
            .last_to(email)
            .await
            .expect("no email was sent");
        mail.content
            .split(|c: char| !c.is_ascii_digit())
            .find(|chunk| chunk.len() == 6)
            .expect("email carries no code")
            .to_owned()
    }

    pub async fn account(&self, email: &str) -> Account {
        self.account_store
            .find_by_email(&Email::try_from(email.to_owned()).unwrap())
            .await
            .unwrap()
    }

    /// Registers, verifies and logs `email` in on a new client.
    pub async fn signed_in(&self, email: &str) -> Client {
        assert_eq!(self.register(email, PASSWORD).await.status().as_u16(), 200);
        let code = self.last_code_for(email).await;
        assert_eq!(self.verify(email, &code).await.status().as_u16(), 200);

        let client = Self::client();
        assert_eq!(
            self.login(&client, email, PASSWORD).await.status().as_u16(),
            200
        );
        client
    }

    /// Publishes a magazine as `client` and returns its id.
    pub async fn publish(&self, client: &Client, title: &str) -> String {
        let response = self
            .post_json(
                client,
                "/magazines/upload",
                &json!({
                    "title": title,
                    "description": "A monthly digest",
                    "categories": ["tech"],
                    "fileUrl": "http://files.test/uploads/issue.pdf",
                    "coverImageUrl": "http://files.test/uploads/cover.png",
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.unwrap();
        body["magazine"]["id"].as_str().unwrap().to_owned()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.uploads_dir);
    }
}

pub fn random_email() -> String {
    use fake::{Fake, faker::internet::en::SafeEmail};
    SafeEmail().fake()
}

pub async fn message(response: Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["message"].as_str().unwrap_or_default().to_owned()
}
