mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use color_eyre::Result;
use common::{
    JPEG, PNG, Part, body_bytes, body_json, request_id_header, test_app, upload_request,
};
use common_services::database::memory_photo_store::MemoryPhotoStore;

#[tokio::test]
async fn stores_a_batch_and_serves_it_back() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;

    let response = app
        .send(upload_request(&[
            Part::file("beach day.jpg", JPEG),
            Part::file("cat.png", PNG),
        ])?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await?;
    assert_eq!(json["count"], 2);

    let saved = json["saved"].as_array().expect("saved is an array");
    assert_eq!(saved[0]["id"], 1);
    assert_eq!(saved[1]["id"], 2);
    let url = saved[0]["url"].as_str().expect("url is a string");
    assert!(url.starts_with("/media/photos/original/"));
    assert!(url.ends_with("_beach_day.jpg"));

    let photos = app.store.photos();
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].file_name, "beach day.jpg");
    assert_eq!(photos[0].mime_type.as_deref(), Some("image/jpeg"));
    assert_eq!(photos[0].size_bytes, JPEG.len() as i64);
    assert_eq!(photos[1].mime_type.as_deref(), Some("image/png"));
    assert_eq!(app.stored_files()?.len(), 2);

    let media = app.get(url).await?;
    assert_eq!(media.status(), StatusCode::OK);
    assert_eq!(
        media.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
        Some(&b"public, max-age=31536000, immutable"[..])
    );
    assert_eq!(body_bytes(media).await?, JPEG);
    Ok(())
}

#[tokio::test]
async fn stops_at_the_first_rejected_file() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;

    let response = app
        .send(upload_request(&[
            Part::file("first.jpg", JPEG),
            Part::file("notes.txt", b"just some text, not an image"),
            Part::file("third.png", PNG),
        ])?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await?;
    assert_eq!(json["code"], "UPLOAD_FAILED");
    assert!(
        json["message"]
            .as_str()
            .expect("message is a string")
            .contains("notes.txt")
    );

    // The first file stays, the rejected one is cleaned up and the third is never read.
    let photos = app.store.photos();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].file_name, "first.jpg");
    assert_eq!(app.store.calls(), 1);
    assert_eq!(app.stored_files()?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn oversized_file_leaves_nothing_behind() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;
    let mut big = JPEG.to_vec();
    big.resize(1024 * 1024 + 1, 0xAB);

    let response = app
        .send(upload_request(&[Part::file("huge.jpg", &big)])?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?["code"], "UPLOAD_FAILED");
    assert_eq!(app.store.calls(), 0);
    assert!(app.stored_files()?.is_empty());
    Ok(())
}

#[tokio::test]
async fn file_exactly_at_the_limit_is_accepted() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;
    let mut exact = JPEG.to_vec();
    exact.resize(1024 * 1024, 0xAB);

    let response = app
        .send(upload_request(&[Part::file("exact.jpg", &exact)])?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.store.photos()[0].size_bytes, 1024 * 1024);
    Ok(())
}

#[tokio::test]
async fn database_failure_removes_the_stored_file() -> Result<()> {
    let app = test_app(MemoryPhotoStore::failing_inserts())?;

    let response = app
        .send(upload_request(&[Part::file("a.jpg", JPEG)])?)
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await?["code"], "INTERNAL");
    assert!(app.stored_files()?.is_empty());
    Ok(())
}

#[tokio::test]
async fn request_without_files_is_rejected() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;

    let response = app
        .send(upload_request(&[
            Part {
                name: "comment",
                file_name: None,
                data: b"hello",
            },
            Part {
                name: "other",
                file_name: Some("skipped.jpg"),
                data: JPEG,
            },
            Part {
                name: "files",
                file_name: None,
                data: JPEG,
            },
        ])?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?["code"], "NO_FILES");
    assert_eq!(app.store.calls(), 0);
    assert!(app.stored_files()?.is_empty());
    Ok(())
}

#[tokio::test]
async fn non_multipart_body_is_a_bad_payload() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;

    let response = app
        .send(
            Request::post("/api/upload")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let request_id = request_id_header(&response).expect("response carries a request id");
    let json = body_json(response).await?;
    assert_eq!(json["code"], "BAD_PAYLOAD");
    assert_eq!(json["requestId"], request_id.as_str());
    Ok(())
}

#[tokio::test]
async fn client_request_id_is_echoed() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;
    let mut request = upload_request(&[])?;
    request
        .headers_mut()
        .insert("x-request-id", "trace-me-42".parse()?);

    let response = app.send(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(request_id_header(&response).as_deref(), Some("trace-me-42"));
    let json = body_json(response).await?;
    assert_eq!(json["code"], "NO_FILES");
    assert_eq!(json["requestId"], "trace-me-42");
    Ok(())
}

#[tokio::test]
async fn identical_uploads_get_distinct_paths() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;

    let response = app
        .send(upload_request(&[
            Part::file("same.jpg", JPEG),
            Part::file("same.jpg", JPEG),
        ])?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let photos = app.store.photos();
    assert_ne!(photos[0].path_original, photos[1].path_original);
    assert_eq!(app.stored_files()?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn long_client_names_are_shortened_not_rejected() -> Result<()> {
    let app = test_app(MemoryPhotoStore::new())?;
    let name = format!("{}.jpg", "a".repeat(240));

    let response = app
        .send(upload_request(&[Part::file(&name, JPEG)])?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let photos = app.store.photos();
    assert_eq!(photos[0].file_name, name);
    let files = app.stored_files()?;
    assert_eq!(files.len(), 1);
    let stored = files[0]
        .file_name()
        .and_then(|n| n.to_str())
        .expect("stored name is utf-8");
    assert!(stored.len() <= 255);
    assert!(stored.ends_with(".jpg"));
    Ok(())
}
