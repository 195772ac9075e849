use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jpeg_encoder::{ColorType, Encoder};
use tower::ServiceExt;

use warpkit::image::{Image, ImageSize};
use warpkit::io::jpeg::{encode_image_jpeg_rgb8, read_image_jpeg_rgb8};
use warpkit::io::png::encode_image_png_rgb8;
use warpkit_serve::{app, ServeConfig};

const BOUNDARY: &str = "warpkit-test-boundary";

fn test_app(tmp_dir: &tempfile::TempDir) -> (Router, ServeConfig) {
    let config = ServeConfig {
        upload_dir: tmp_dir.path().join("uploads"),
        processed_dir: tmp_dir.path().join("processed"),
    };
    let router = app(config.clone()).unwrap();
    (router, config)
}

fn multipart_body(file: Option<(&str, &[u8])>, transformations: &[&str]) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    for value in transformations {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                 name=\"transformations\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn process_request(file: Option<(&str, &[u8])>, transformations: &[&str]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(file, transformations)))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A gray image without any structure, safe to compare after JPEG round trips.
fn flat_image(value: u8) -> Image<u8, 3> {
    Image::from_size_val(
        ImageSize {
            width: 32,
            height: 16,
        },
        value,
    )
    .unwrap()
}

/// Bright left half, dark right half. Halves are block aligned so the
/// values survive JPEG compression.
fn half_white_image() -> Image<u8, 3> {
    let (width, height) = (64, 16);
    let mut data = Vec::with_capacity(width * height * 3);
    for _y in 0..height {
        for x in 0..width {
            let v = if x < width / 2 { 255u8 } else { 0u8 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    Image::new(ImageSize { width, height }, data).unwrap()
}

/// A single channel JPEG with a dark left half and a bright right half,
/// block aligned like [`half_white_image`].
fn gray_halves_jpeg() -> Vec<u8> {
    let (width, height) = (64usize, 16usize);
    let mut luma = Vec::with_capacity(width * height);
    for _y in 0..height {
        for x in 0..width {
            luma.push(if x < width / 2 { 30u8 } else { 220u8 });
        }
    }
    let mut jpeg_data = Vec::new();
    let encoder = Encoder::new(&mut jpeg_data, 100);
    encoder.encode(&luma, width as u16, height as u16, ColorType::Luma).unwrap();
    jpeg_data
}

#[tokio::test]
async fn index_serves_upload_form() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, _config) = test_app(&tmp_dir);

    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("<form action=\"/process\""));
    assert!(body.contains("name=\"image\""));
}

#[tokio::test]
async fn process_without_file_is_rejected() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, _config) = test_app(&tmp_dir);

    let response = app
        .oneshot(process_request(None, &["flip"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "No file uploaded.");
}

#[tokio::test]
async fn process_with_empty_filename_is_rejected() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, _config) = test_app(&tmp_dir);

    let jpeg = encode_image_jpeg_rgb8(&flat_image(128), 95).unwrap();
    let response = app
        .oneshot(process_request(Some(("", &jpeg)), &["flip"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, "No selected file.");
}

#[tokio::test]
async fn process_with_corrupt_image_is_rejected() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, config) = test_app(&tmp_dir);

    let response = app
        .oneshot(process_request(Some(("broken.jpg", b"not an image")), &["flip"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "Error loading the image. Ensure it is a valid image file."
    );

    // the upload is saved before decoding is attempted
    assert!(config.upload_dir.join("broken.jpg").exists());
}

#[tokio::test]
async fn process_flip_writes_mirrored_result() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, config) = test_app(&tmp_dir);

    let image = half_white_image();
    let jpeg = encode_image_jpeg_rgb8(&image, 100).unwrap();

    let response = app
        .clone()
        .oneshot(process_request(Some(("halves.jpg", &jpeg)), &["flip"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Flipped"));
    assert!(body.contains("/processed/Flipped.jpg"));

    assert!(config.upload_dir.join("halves.jpg").exists());
    let result_path = config.processed_dir.join("Flipped.jpg");
    assert!(result_path.exists());

    // mirrored: dark on the left, bright on the right
    let flipped = read_image_jpeg_rgb8(&result_path).unwrap();
    assert_eq!(flipped.size(), image.size());
    assert!(*flipped.get([8, 0, 0]).unwrap() < 50);
    assert!(*flipped.get([8, 63, 0]).unwrap() > 200);

    // the result can be fetched through the service
    let response = app
        .oneshot(get_request("/processed/Flipped.jpg"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn process_png_upload() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, config) = test_app(&tmp_dir);

    let png = encode_image_png_rgb8(&flat_image(200)).unwrap();
    let response = app
        .oneshot(process_request(Some(("photo.png", &png)), &["scale"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("/processed/Scaled.jpg"));

    let scaled = read_image_jpeg_rgb8(&config.processed_dir.join("Scaled.jpg")).unwrap();
    assert_eq!(scaled.size().width, 48);
    assert_eq!(scaled.size().height, 24);
}

#[tokio::test]
async fn process_grayscale_jpeg_upload() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, config) = test_app(&tmp_dir);

    // single channel input decodes to rgb and processes like any other image
    let jpeg = gray_halves_jpeg();
    let response = app
        .oneshot(process_request(Some(("gray.jpg", &jpeg)), &["flip"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("/processed/Flipped.jpg"));

    // mirrored: bright on the left, dark on the right
    let flipped = read_image_jpeg_rgb8(&config.processed_dir.join("Flipped.jpg")).unwrap();
    assert_eq!(flipped.size().width, 64);
    assert_eq!(flipped.size().height, 16);
    assert!(*flipped.get([8, 0, 0]).unwrap() > 180);
    assert!(*flipped.get([8, 63, 0]).unwrap() < 70);
}

#[tokio::test]
async fn process_without_selection_returns_empty_results() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, _config) = test_app(&tmp_dir);

    let jpeg = encode_image_jpeg_rgb8(&flat_image(128), 95).unwrap();
    let response = app
        .oneshot(process_request(Some(("plain.jpg", &jpeg)), &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(!body.contains("<img"));
}

#[tokio::test]
async fn process_unknown_selection_is_ignored() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, _config) = test_app(&tmp_dir);

    let jpeg = encode_image_jpeg_rgb8(&flat_image(128), 95).unwrap();
    let response = app
        .oneshot(process_request(
            Some(("plain.jpg", &jpeg)),
            &["sharpen", "flip"],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Flipped"));
    assert!(!body.contains("Sheared"));
}

#[tokio::test]
async fn results_follow_a_fixed_order() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, config) = test_app(&tmp_dir);

    let jpeg = encode_image_jpeg_rgb8(&flat_image(128), 95).unwrap();

    // submitted in reverse of the order they are applied in
    let response = app
        .oneshot(process_request(
            Some(("plain.jpg", &jpeg)),
            &["perspective", "translate"],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;

    let translated = body.find("Translated").unwrap();
    let perspective = body.find("Perspective").unwrap();
    assert!(translated < perspective);

    assert!(config.processed_dir.join("Translated.jpg").exists());
    assert!(config.processed_dir.join("Perspective.jpg").exists());
}

#[tokio::test]
async fn repeated_uploads_overwrite_results() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, config) = test_app(&tmp_dir);

    let bright = encode_image_jpeg_rgb8(&flat_image(230), 95).unwrap();
    let dark = encode_image_jpeg_rgb8(&flat_image(30), 95).unwrap();

    let response = app
        .clone()
        .oneshot(process_request(Some(("first.jpg", &bright)), &["rotate"]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(process_request(Some(("second.jpg", &dark)), &["rotate"]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // results are keyed by the transformation name: exactly one file, and
    // the second upload replaces the first
    let entries = std::fs::read_dir(&config.processed_dir).unwrap().count();
    assert_eq!(entries, 1);

    // the rotation center is a fixed point, so it keeps the flat gray value
    let rotated = read_image_jpeg_rgb8(&config.processed_dir.join("Rotated.jpg")).unwrap();
    let value = *rotated.get([8, 16, 0]).unwrap();
    assert!(value < 60, "expected the second upload's pixels, got {value}");
}

#[tokio::test]
async fn process_crop_disjoint_from_image_fails() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, _config) = test_app(&tmp_dir);

    // 32x16 lies entirely outside the fixed crop region
    let jpeg = encode_image_jpeg_rgb8(&flat_image(128), 95).unwrap();
    let response = app
        .oneshot(process_request(Some(("tiny.jpg", &jpeg)), &["crop"]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn upload_file_names_are_sanitized() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, config) = test_app(&tmp_dir);

    let jpeg = encode_image_jpeg_rgb8(&flat_image(128), 95).unwrap();
    let response = app
        .oneshot(process_request(
            Some(("../../escape.jpg", &jpeg)),
            &["flip"],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(config.upload_dir.join("escape.jpg").exists());
}

#[tokio::test]
async fn processed_missing_file_is_not_found() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, _config) = test_app(&tmp_dir);

    let response = app
        .oneshot(get_request("/processed/Missing.jpg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "File not found.");
}

#[tokio::test]
async fn processed_rejects_path_traversal() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let (app, config) = test_app(&tmp_dir);

    // plant a file outside the processed directory
    std::fs::write(config.upload_dir.join("secret.jpg"), b"secret").unwrap();

    let response = app
        .oneshot(get_request("/processed/..%2Fuploads%2Fsecret.jpg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
