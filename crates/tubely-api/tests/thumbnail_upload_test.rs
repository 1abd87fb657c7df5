//! Thumbnail upload integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnail_upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::{bearer, make_token, make_token_with};
use helpers::{dir_is_empty, fixtures, setup_test_app};
use uuid::Uuid;

fn thumbnail_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name("thumbnail.bin")
        .mime_type(mime_type);
    MultipartForm::new().add_part("thumbnail", part)
}

fn error_code(response: &axum_test::TestResponse) -> String {
    let body: serde_json::Value = response.json();
    body.get("code")
        .and_then(|v| v.as_str())
        .expect("Expected 'code' in error response")
        .to_string()
}

#[tokio::test]
async fn test_upload_png_thumbnail() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;
    let png = fixtures::create_test_png(2048);

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(&make_token(owner)))
        .multipart(thumbnail_form(png.clone(), "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let location = body
        .get("thumbnail_url")
        .and_then(|v| v.as_str())
        .expect("Expected 'thumbnail_url' in upload response")
        .to_string();

    let key = location
        .strip_prefix("http://localhost:8091/assets/")
        .expect("Location should point at the assets route");
    let (encoded, extension) = key.rsplit_once('.').unwrap();
    assert_eq!(extension, "png");
    assert_eq!(encoded.len(), 43);
    assert!(encoded
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

    assert_eq!(std::fs::read(app.assets_path().join(key)).unwrap(), png);
    assert_eq!(app.get_video(video.id).await.thumbnail_url, Some(location.clone()));

    // The stored file is served back under /assets.
    let served = app.client().get(&format!("/assets/{}", key)).await;
    assert_eq!(served.status_code(), 200);
    assert_eq!(served.as_bytes().as_ref(), png.as_slice());
}

#[tokio::test]
async fn test_upload_jpeg_with_parameters() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(&make_token(owner)))
        .multipart(thumbnail_form(vec![0xFF, 0xD8, 0xFF, 0xE0], "IMAGE/JPEG; q=0.9"))
        .await;

    assert_eq!(response.status_code(), 200);
    let stored = app.get_video(video.id).await;
    assert!(stored.thumbnail_url.unwrap().ends_with(".jpeg"));
}

#[tokio::test]
async fn test_pdf_thumbnail_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(&make_token(owner)))
        .multipart(thumbnail_form(fixtures::create_test_pdf(), "application/pdf"))
        .await;

    assert_eq!(response.status_code(), 415);
    assert_eq!(error_code(&response), "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(app.get_video(video.id).await, video);
    assert!(dir_is_empty(app.assets_path()));
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .multipart(thumbnail_form(fixtures::create_test_png(256), "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(error_code(&response), "UNAUTHENTICATED");
    assert_eq!(app.get_video(video.id).await, video);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;
    let forged = make_token_with("not-the-configured-secret", owner, 3600);

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(&forged))
        .multipart(thumbnail_form(fixtures::create_test_png(256), "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(app.get_video(video.id).await, video);
}

#[tokio::test]
async fn test_other_users_video_forbidden() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(&make_token(Uuid::new_v4())))
        .multipart(thumbnail_form(fixtures::create_test_png(256), "image/png"))
        .await;

    assert_eq!(response.status_code(), 403);
    assert_eq!(error_code(&response), "FORBIDDEN");
    assert!(dir_is_empty(app.assets_path()));
    assert_eq!(app.get_video(video.id).await, video);
}

#[tokio::test]
async fn test_invalid_video_id_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let response = app
        .client()
        .post("/api/thumbnail_upload/not-a-uuid")
        .add_header("Authorization", bearer(&make_token(owner)))
        .multipart(thumbnail_form(fixtures::create_test_png(256), "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(error_code(&response), "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_video_not_found() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", Uuid::new_v4()))
        .add_header("Authorization", bearer(&make_token(owner)))
        .multipart(thumbnail_form(fixtures::create_test_png(256), "image/png"))
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(error_code(&response), "RECORD_NOT_FOUND");
}

#[tokio::test]
async fn test_missing_thumbnail_field_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let part = Part::bytes(bytes::Bytes::from(fixtures::create_test_png(256)))
        .file_name("thumbnail.png")
        .mime_type("image/png");
    let form = MultipartForm::new().add_part("file", part);

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(&make_token(owner)))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.get_video(video.id).await, video);
}

#[tokio::test]
async fn test_other_form_fields_are_skipped() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let part = Part::bytes(bytes::Bytes::from(fixtures::create_test_png(512)))
        .file_name("thumbnail.png")
        .mime_type("image/png");
    let form = MultipartForm::new()
        .add_text("title", "ignored")
        .add_part("thumbnail", part);

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(&make_token(owner)))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_oversized_thumbnail_rejected() {
    let app = helpers::setup_test_app_with(|config| {
        config.max_thumbnail_size_bytes = 1024;
    })
    .await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .add_header("Authorization", bearer(&make_token(owner)))
        .multipart(thumbnail_form(fixtures::create_test_png(4096), "image/png"))
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(error_code(&response), "PAYLOAD_TOO_LARGE");
    assert!(dir_is_empty(app.assets_path()));
    assert_eq!(app.get_video(video.id).await, video);
}
