use reqwest::{Client, Response, header::LOCATION};

use crate::helpers::{CLIENT_URL, TestApp, random_email};

fn location(response: &Response) -> String {
    response.headers()[LOCATION].to_str().unwrap().to_owned()
}

/// Starts the handshake and returns the `state` the provider would echo back.
async fn start_handshake(app: &TestApp, client: &Client) -> String {
    let response = app.get(client, "/auth/google").await;
    assert_eq!(response.status().as_u16(), 303);

    let target = location(&response);
    assert!(target.starts_with("https://accounts.test/auth"));
    target.split("state=").nth(1).unwrap().to_owned()
}

async fn verified_account(app: &TestApp) -> String {
    let email = random_email();
    app.register(&email, "pw").await;
    let code = app.last_code_for(&email).await;
    app.verify(&email, &code).await;
    email
}

#[tokio::test]
async fn callback_links_google_and_opens_a_session() {
    let app = TestApp::new().await;
    let email = verified_account(&app).await;
    let client = TestApp::client();
    let state = start_handshake(&app, &client).await;
    app.identity_provider
        .will_return("google-123", Some(&email), Some("Reader"))
        .await;

    let callback = app
        .get(
            &client,
            &format!("/auth/google/callback?code=abc&state={state}"),
        )
        .await;

    assert_eq!(callback.status().as_u16(), 303);
    assert_eq!(location(&callback), format!("{CLIENT_URL}/dashboard"));
    assert_eq!(
        app.account(&email).await.google_id(),
        Some("google-123")
    );

    let me = app.get(&client, "/auth/user").await;
    assert_eq!(me.status().as_u16(), 200);
}

#[tokio::test]
async fn callback_with_a_forged_state_goes_back_to_login() {
    let app = TestApp::new().await;
    let email = verified_account(&app).await;
    let client = TestApp::client();
    start_handshake(&app, &client).await;
    app.identity_provider
        .will_return("google-123", Some(&email), None)
        .await;

    let callback = app
        .get(&client, "/auth/google/callback?code=abc&state=forged")
        .await;

    assert_eq!(location(&callback), format!("{CLIENT_URL}/login"));
    assert_eq!(app.account(&email).await.google_id(), None);
    assert_eq!(app.get(&client, "/auth/user").await.status().as_u16(), 401);
}

#[tokio::test]
async fn callback_for_an_unregistered_address_goes_back_to_login() {
    let app = TestApp::new().await;
    let client = TestApp::client();
    let state = start_handshake(&app, &client).await;
    app.identity_provider
        .will_return("google-999", Some(&random_email()), None)
        .await;

    let callback = app
        .get(
            &client,
            &format!("/auth/google/callback?code=abc&state={state}"),
        )
        .await;

    assert_eq!(location(&callback), format!("{CLIENT_URL}/login"));
}

#[tokio::test]
async fn callback_for_an_unverified_account_goes_back_to_login() {
    let app = TestApp::new().await;
    let email = random_email();
    app.register(&email, "pw").await;
    let client = TestApp::client();
    let state = start_handshake(&app, &client).await;
    app.identity_provider
        .will_return("google-123", Some(&email), None)
        .await;

    let callback = app
        .get(
            &client,
            &format!("/auth/google/callback?code=abc&state={state}"),
        )
        .await;

    assert_eq!(location(&callback), format!("{CLIENT_URL}/login"));
}

#[tokio::test]
async fn provider_denial_goes_back_to_login() {
    let app = TestApp::new().await;
    let client = TestApp::client();
    let state = start_handshake(&app, &client).await;

    let callback = app
        .get(
            &client,
            &format!("/auth/google/callback?error=access_denied&state={state}"),
        )
        .await;

    assert_eq!(location(&callback), format!("{CLIENT_URL}/login"));
}
