use reqwest::header::AUTHORIZATION;
use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, message, random_email};

#[tokio::test]
async fn register_sends_a_code_and_creates_an_unverified_account() {
    let app = TestApp::new().await;
    let email = random_email();

    let response = app.register(&email, PASSWORD).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "OTP sent to your email. Please verify.");
    assert_eq!(body["email"], email.as_str());

    let mail = app.email_client.last_to(&email).await.unwrap();
    assert_eq!(mail.subject, "Your OTP for Registration");
    assert!(!app.account(&email).await.is_verified());
}

#[tokio::test]
async fn registering_again_before_expiry_keeps_the_code() {
    let app = TestApp::new().await;
    let email = random_email();

    app.register(&email, PASSWORD).await;
    let first_code = app.account(&email).await.code().cloned();

    let response = app.register(&email, PASSWORD).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        message(response).await,
        "OTP already sent. Please verify your email."
    );
    assert_eq!(app.account(&email).await.code().cloned(), first_code);
    assert_eq!(app.email_client.sent().await.len(), 1);
}

#[tokio::test]
async fn registering_a_verified_address_is_rejected() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signed_in(&email).await;

    let response = app.register(&email, PASSWORD).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(message(response).await, "Existing user. Please log in.");
}

#[tokio::test]
async fn register_rejects_malformed_bodies() {
    let app = TestApp::new().await;

    let missing_password = app
        .post_json(
            &app.http_client,
            "/auth/register",
            &json!({ "email": random_email() }),
        )
        .await;
    assert_eq!(missing_password.status().as_u16(), 400);

    let bad_email = app.register("not-an-email", PASSWORD).await;
    assert_eq!(bad_email.status().as_u16(), 400);
}

#[tokio::test]
async fn a_consumed_code_cannot_verify_twice() {
    let app = TestApp::new().await;
    let email = random_email();
    app.register(&email, PASSWORD).await;
    let code = app.last_code_for(&email).await;

    let first = app.verify(&email, &code).await;
    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(
        message(first).await,
        "OTP verified successfully. You can now log in."
    );

    let second = app.verify(&email, &code).await;
    assert_eq!(second.status().as_u16(), 400);
    assert_eq!(message(second).await, "Invalid or expired OTP.");
}

#[tokio::test]
async fn verifying_an_unknown_address_is_a_bad_request() {
    let app = TestApp::new().await;

    let response = app.verify(&random_email(), "123456").await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(message(response).await, "User not found.");
}

#[tokio::test]
async fn login_requires_verification_even_with_the_right_password() {
    let app = TestApp::new().await;
    let email = random_email();
    app.register(&email, PASSWORD).await;

    let response = app.login(&app.http_client, &email, PASSWORD).await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(
        message(response).await,
        "Please verify your email before logging in."
    );
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signed_in(&email).await;

    let wrong_password = app.login(&TestApp::client(), &email, "nope").await;
    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(message(wrong_password).await, "Invalid credentials");

    let unknown = app
        .login(&TestApp::client(), &random_email(), PASSWORD)
        .await;
    assert_eq!(unknown.status().as_u16(), 401);
    assert_eq!(message(unknown).await, "User not found. Please register.");

    let missing = app
        .post_json(&app.http_client, "/auth/login", &json!({ "email": email }))
        .await;
    assert_eq!(missing.status().as_u16(), 400);
    assert_eq!(message(missing).await, "Please provide email and password");
}

#[tokio::test]
async fn login_sets_a_session_cookie_and_returns_a_token() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signed_in(&email).await;
    let client = TestApp::client();

    let response = app.login(&client, &email, PASSWORD).await;

    assert_eq!(response.status().as_u16(), 200);
    let cookie = response
        .cookies()
        .find(|cookie| cookie.name() == "connect.sid")
        .expect("session cookie");
    assert!(cookie.http_only());
    assert_eq!(cookie.max_age().map(|age| age.as_secs()), Some(86_400));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
    assert_eq!(body["user"]["email"], email.as_str());

    let me = app.get(&client, "/auth/user").await;
    assert_eq!(me.status().as_u16(), 200);
    let me: Value = me.json().await.unwrap();
    assert_eq!(me["email"], email.as_str());
}

#[tokio::test]
async fn guarded_routes_reject_anonymous_requests() {
    let app = TestApp::new().await;

    for path in ["/auth/user", "/magazines/user-magazines"] {
        let response = app.get(&TestApp::client(), path).await;
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(message(response).await, "Unauthorized. Please log in.");
    }

    let response = app
        .post_json(&TestApp::client(), "/auth/logout", &json!({}))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn login_token_alone_does_not_pass_the_guard() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signed_in(&email).await;
    let login: Value = app
        .login(&TestApp::client(), &email, PASSWORD)
        .await
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap().to_owned();
    let cookieless = TestApp::client();

    for path in ["/auth/user", "/magazines/user-magazines"] {
        let response = cookieless
            .get(app.url(path))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(message(response).await, "Unauthorized. Please log in.");
    }
}

#[tokio::test]
async fn logout_destroys_the_session() {
    let app = TestApp::new().await;
    let client = app.signed_in(&random_email()).await;

    let response = app.post_json(&client, "/auth/logout", &json!({})).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User logged out successfully");

    assert_eq!(app.get(&client, "/auth/user").await.status().as_u16(), 401);
}

#[tokio::test]
async fn forgotten_password_can_be_reset_with_the_mailed_code() {
    let app = TestApp::new().await;
    let email = random_email();
    app.signed_in(&email).await;

    let forgot = app
        .post_json(
            &app.http_client,
            "/auth/forgot-password",
            &json!({ "email": email }),
        )
        .await;
    assert_eq!(forgot.status().as_u16(), 200);
    assert_eq!(message(forgot).await, "OTP sent to your email");
    let mail = app.email_client.last_to(&email).await.unwrap();
    assert_eq!(mail.subject, "Password Reset OTP");
    let code = app.last_code_for(&email).await;

    let wrong = app
        .post_json(
            &app.http_client,
            "/auth/reset-password",
            &json!({ "email": email, "otp": "000000", "newPassword": "fresh" }),
        )
        .await;
    assert_eq!(wrong.status().as_u16(), 400);
    assert_eq!(message(wrong).await, "Invalid or expired OTP");

    let reset = app
        .post_json(
            &app.http_client,
            "/auth/reset-password",
            &json!({ "email": email, "otp": code, "newPassword": "fresh" }),
        )
        .await;
    assert_eq!(reset.status().as_u16(), 200);
    assert_eq!(message(reset).await, "Password reset successfully");

    let old = app.login(&TestApp::client(), &email, PASSWORD).await;
    assert_eq!(old.status().as_u16(), 401);
    let new = app.login(&TestApp::client(), &email, "fresh").await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn password_reset_for_an_unknown_address_is_not_found() {
    let app = TestApp::new().await;

    let forgot = app
        .post_json(
            &app.http_client,
            "/auth/forgot-password",
            &json!({ "email": random_email() }),
        )
        .await;
    assert_eq!(forgot.status().as_u16(), 404);
    assert_eq!(message(forgot).await, "User not found");

    let reset = app
        .post_json(
            &app.http_client,
            "/auth/reset-password",
            &json!({ "email": random_email(), "otp": "123456", "newPassword": "x" }),
        )
        .await;
    assert_eq!(reset.status().as_u16(), 404);
}
