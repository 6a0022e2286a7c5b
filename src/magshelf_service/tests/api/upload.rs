use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::helpers::{TestApp, message, random_email};

fn form(file_name: &str, mime: &str, bytes: &'static [u8]) -> Form {
    Form::new().part(
        "file",
        Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(mime)
            .unwrap(),
    )
}

#[tokio::test]
async fn uploaded_file_is_served_back_from_its_url() {
    let app = TestApp::new().await;
    let client = app.signed_in(&random_email()).await;

    let response = client
        .post(app.url("/upload"))
        .multipart(form("issue 1.pdf", "application/pdf", b"%PDF-1.7 magshelf"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let file_url = body["fileUrl"].as_str().unwrap().to_owned();
    assert!(file_url.starts_with(&app.url("/uploads/")));
    assert!(file_url.ends_with("issue_1.pdf"));

    let served = client.get(&file_url).send().await.unwrap();
    assert_eq!(served.status().as_u16(), 200);
    assert_eq!(&served.bytes().await.unwrap()[..], b"%PDF-1.7 magshelf");
}

#[tokio::test]
async fn unsupported_file_types_are_rejected() {
    let app = TestApp::new().await;
    let client = app.signed_in(&random_email()).await;

    let response = client
        .post(app.url("/upload"))
        .multipart(form("run.sh", "text/x-shellscript", b"echo hi"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn upload_without_a_file_field_is_rejected() {
    let app = TestApp::new().await;
    let client = app.signed_in(&random_email()).await;

    let response = client
        .post(app.url("/upload"))
        .multipart(Form::new().text("note", "no file here"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(message(response).await, "No file uploaded");
}

#[tokio::test]
async fn upload_requires_authentication() {
    let app = TestApp::new().await;

    let response = TestApp::client()
        .post(app.url("/upload"))
        .multipart(form("cover.png", "image/png", b"\x89PNG"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}
