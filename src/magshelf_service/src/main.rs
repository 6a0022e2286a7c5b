use std::sync::Arc;

use color_eyre::eyre::Result;
use magshelf_adapters::{
    Adapters, AppConfig, AppState, Settings,
    email::PostmarkEmailClient,
    hashing::Argon2PasswordHasher,
    oauth::GoogleIdentityProvider,
    persistence::{PostgresAccountStore, PostgresMagazineStore, RedisSessionStore},
    storage::LocalFileStorage,
};
use magshelf_core::Email;
use magshelf_service::{
    MagazineService,
    helpers::{configure_postgresql, configure_redis},
    tracing::init_tracing,
};
use reqwest::Client as HttpClient;
use tokio::{net::TcpListener, sync::Mutex};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    let pg_pool = configure_postgresql(&settings).await?;
    let redis_conn = Arc::new(Mutex::new(configure_redis(&settings)?));

    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(settings.email_client.sender.clone())?,
        settings.email_client.auth_token.clone(),
        http_client.clone(),
    );

    let identity_provider = GoogleIdentityProvider::new(
        settings.google.client_id.clone(),
        settings.google.client_secret.clone(),
        settings.google.redirect_url.clone(),
        http_client,
    );

    tokio::fs::create_dir_all(&settings.app.uploads_dir).await?;

    let adapters = Adapters {
        account_store: Arc::new(PostgresAccountStore::new(pg_pool.clone())),
        magazine_store: Arc::new(PostgresMagazineStore::new(pg_pool)),
        session_store: Arc::new(RedisSessionStore::new(redis_conn)),
        email_client: Arc::new(email_client),
        file_storage: Arc::new(LocalFileStorage::new(
            &settings.app.uploads_dir,
            &settings.app.public_url,
        )),
        identity_provider: Arc::new(identity_provider),
        password_hasher: Arc::new(Argon2PasswordHasher::default()),
    };

    let state = AppState::new(adapters, AppConfig::from_settings(&settings));
    let service = MagazineService::new(state, &settings.app.uploads_dir, &settings.app.assets_dir);

    let listener = TcpListener::bind(&settings.app.address).await?;
    tracing::info!("Starting magshelf...");

    service
        .run_standalone(listener, Some(settings.auth.allowed_origins.clone()))
        .await?;

    Ok(())
}
