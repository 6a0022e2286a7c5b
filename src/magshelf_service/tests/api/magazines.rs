use reqwest::Client;
use serde_json::{Value, json};

use crate::helpers::{TestApp, message, random_email};

async fn like(app: &TestApp, client: &Client, id: &str) -> Value {
    let response = app
        .post_json(client, &format!("/magazines/{id}/like"), &json!({}))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

async fn list(app: &TestApp, query: &str) -> Vec<Value> {
    let response = app
        .get(&TestApp::client(), &format!("/magazines{query}"))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn upload_magazine_returns_the_created_record() {
    let app = TestApp::new().await;
    let owner_email = random_email();
    let owner = app.signed_in(&owner_email).await;

    let response = app
        .post_json(
            &owner,
            "/magazines/upload",
            &json!({
                "title": "Rust Monthly",
                "description": "Ownership, every month",
                "categories": ["tech", " tech ", "programming"],
                "fileUrl": "http://files.test/uploads/rust.pdf",
                "coverImageUrl": "http://files.test/uploads/rust.png",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Magazine uploaded successfully");
    let magazine = &body["magazine"];
    assert_eq!(magazine["title"], "Rust Monthly");
    assert_eq!(magazine["categories"], json!(["tech", "programming"]));
    assert_eq!(magazine["fileUrl"], "http://files.test/uploads/rust.pdf");
    assert_eq!(
        magazine["uploadedBy"],
        json!(app.account(&owner_email).await.id())
    );
    assert_eq!(magazine["likes"], json!([]));
}

#[tokio::test]
async fn upload_magazine_requires_every_field() {
    let app = TestApp::new().await;
    let owner = app.signed_in(&random_email()).await;

    let response = app
        .post_json(
            &owner,
            "/magazines/upload",
            &json!({ "title": "Half a magazine", "categories": ["tech"] }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(message(response).await, "description is required");
}

#[tokio::test]
async fn list_filters_by_category_and_search() {
    let app = TestApp::new().await;
    let owner = app.signed_in(&random_email()).await;
    app.publish(&owner, "Rust Monthly").await;
    app.publish(&owner, "Garden Weekly").await;

    assert_eq!(list(&app, "").await.len(), 2);
    assert_eq!(list(&app, "?category=tech").await.len(), 2);
    assert_eq!(list(&app, "?category=gardening").await.len(), 0);

    let found = list(&app, "?search=rust").await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Rust Monthly");

    // search is literal, not a pattern
    assert_eq!(list(&app, "?search=.*").await.len(), 0);
}

#[tokio::test]
async fn list_populates_the_uploader() {
    let app = TestApp::new().await;
    let owner_email = random_email();
    let owner = app.signed_in(&owner_email).await;
    app.publish(&owner, "Rust Monthly").await;

    let listed = list(&app, "").await;

    assert_eq!(listed[0]["uploadedBy"]["email"], owner_email.as_str());
    assert!(listed[0]["uploadedBy"]["name"].is_string());
}

#[tokio::test]
async fn user_magazines_only_lists_the_callers_records() {
    let app = TestApp::new().await;
    let alice = app.signed_in(&random_email()).await;
    let bob = app.signed_in(&random_email()).await;
    app.publish(&alice, "Alice's Almanac").await;
    app.publish(&bob, "Bob's Bulletin").await;

    let response = app.get(&alice, "/magazines/user-magazines").await;

    assert_eq!(response.status().as_u16(), 200);
    let mine: Vec<Value> = response.json().await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["title"], "Alice's Almanac");
}

#[tokio::test]
async fn liking_twice_restores_the_like_set() {
    let app = TestApp::new().await;
    let owner = app.signed_in(&random_email()).await;
    let reader = app.signed_in(&random_email()).await;
    let id = app.publish(&owner, "Rust Monthly").await;

    let liked = like(&app, &reader, &id).await;
    assert_eq!(liked["likes"].as_array().unwrap().len(), 1);

    let unliked = like(&app, &reader, &id).await;
    assert_eq!(unliked["likes"], json!([]));
}

#[tokio::test]
async fn liking_a_missing_magazine_is_not_found() {
    let app = TestApp::new().await;
    let reader = app.signed_in(&random_email()).await;

    for id in [uuid::Uuid::new_v4().to_string(), "not-an-id".to_owned()] {
        let response = app
            .post_json(&reader, &format!("/magazines/{id}/like"), &json!({}))
            .await;
        assert_eq!(response.status().as_u16(), 404);
        assert_eq!(message(response).await, "Magazine not found");
    }
}

#[tokio::test]
async fn comments_append_in_order() {
    let app = TestApp::new().await;
    let owner = app.signed_in(&random_email()).await;
    let reader = app.signed_in(&random_email()).await;
    let id = app.publish(&owner, "Rust Monthly").await;
    let path = format!("/magazines/{id}/comment");

    app.post_json(&reader, &path, &json!({ "text": "First!" }))
        .await;
    let response = app
        .post_json(&owner, &path, &json!({ "text": "Thanks for reading" }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Comment added");
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["text"], "First!");
    assert!(comments[0]["user"]["name"].is_string());

    let blank = app.post_json(&reader, &path, &json!({ "text": "  " })).await;
    assert_eq!(blank.status().as_u16(), 400);
}

#[tokio::test]
async fn owner_can_partially_update() {
    let app = TestApp::new().await;
    let owner = app.signed_in(&random_email()).await;
    let id = app.publish(&owner, "Rust Monthly").await;

    let response = owner
        .put(app.url(&format!("/magazines/{id}")))
        .json(&json!({ "title": "Rust Weekly", "description": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Magazine updated successfully");
    assert_eq!(body["magazine"]["title"], "Rust Weekly");
    assert_eq!(body["magazine"]["description"], "A monthly digest");
}

#[tokio::test]
async fn update_accepts_comma_separated_categories() {
    let app = TestApp::new().await;
    let owner = app.signed_in(&random_email()).await;
    let id = app.publish(&owner, "Rust Monthly").await;

    let response = owner
        .put(app.url(&format!("/magazines/{id}")))
        .json(&json!({ "categories": "tech, programming" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["magazine"]["categories"], json!(["tech", "programming"]));
}

#[tokio::test]
async fn editing_someone_elses_magazine_looks_like_a_missing_one() {
    let app = TestApp::new().await;
    let owner = app.signed_in(&random_email()).await;
    let intruder = app.signed_in(&random_email()).await;
    let id = app.publish(&owner, "Rust Monthly").await;

    let mut responses = Vec::new();
    for target in [id.clone(), uuid::Uuid::new_v4().to_string()] {
        let response = intruder
            .put(app.url(&format!("/magazines/{target}")))
            .json(&json!({ "title": "Hijacked" }))
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        let body: Value = response.json().await.unwrap();
        responses.push((status, body));
    }

    assert_eq!(responses[0], responses[1]);
    assert_eq!(responses[0].0, 404);
    assert_eq!(
        responses[0].1["message"],
        "Magazine not found or not authorized to update"
    );
}

#[tokio::test]
async fn register_to_delete_end_to_end() {
    let app = TestApp::new().await;

    let owner_email = random_email();
    let owner = app.signed_in(&owner_email).await;
    let id = app.publish(&owner, "Quarterly Rustacean").await;

    let found = list(&app, "?search=rustacean").await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], id.as_str());

    let reader = app.signed_in(&random_email()).await;
    let liked = like(&app, &reader, &id).await;
    assert_eq!(liked["likes"].as_array().unwrap().len(), 1);

    let commented: Value = app
        .post_json(
            &reader,
            &format!("/magazines/{id}/comment"),
            &json!({ "text": "Great issue" }),
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(commented["comments"].as_array().unwrap().len(), 1);

    let forbidden = reader
        .delete(app.url(&format!("/magazines/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status().as_u16(), 404);
    assert_eq!(
        message(forbidden).await,
        "Magazine not found or not authorized to delete"
    );

    let deleted = owner
        .delete(app.url(&format!("/magazines/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 200);
    assert_eq!(message(deleted).await, "Magazine deleted successfully");

    assert!(list(&app, "?search=rustacean").await.is_empty());
}
