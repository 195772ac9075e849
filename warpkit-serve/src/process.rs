use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

use warpkit::io::functional::read_image_any_rgb8;
use warpkit::io::jpeg::write_image_jpeg_rgb8;

use crate::config::ServeConfig;
use crate::error::ServeError;
use crate::pages;
use crate::transform::Transform;

// quality used for the result images
const JPEG_QUALITY: u8 = 95;

/// Handler for the process endpoint.
///
/// Saves the uploaded image to the upload directory, applies the selected
/// transformations in a fixed order and responds with a page showing every
/// result image.
pub async fn process_image(
    State(config): State<Arc<ServeConfig>>,
    mut multipart: Multipart,
) -> Result<Html<String>, ServeError> {
    let mut upload: Option<(String, axum::body::Bytes)> = None;
    let mut selected = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "image" if upload.is_none() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                upload = Some((file_name, data));
            }
            "transformations" => {
                if let Some(transform) = Transform::parse(&field.text().await?) {
                    selected.push(transform);
                }
            }
            _ => {}
        }
    }

    let (file_name, data) = upload.ok_or(ServeError::MissingFile)?;
    let file_name = sanitize_file_name(&file_name)
        .ok_or(ServeError::EmptyFilename)?
        .to_string();

    // save the upload before decoding it
    let upload_path = config.upload_dir.join(&file_name);
    tokio::fs::write(&upload_path, &data).await?;

    let image = read_image_any_rgb8(&upload_path).map_err(|e| {
        log::warn!("⚠️ Failed to decode {upload_path:?}: {e}");
        ServeError::Decode(e)
    })?;

    log::info!(
        "📷 Received {file_name} ({}) with {} transformations selected",
        image.size(),
        selected.len()
    );

    // apply the selected transformations in a fixed order
    let mut results = Vec::new();
    for transform in Transform::ALL {
        if !selected.contains(&transform) {
            continue;
        }

        let transformed = transform.apply(&image)?;

        let result_name = format!("{}.jpg", transform.label());
        let result_path = config.processed_dir.join(&result_name);
        write_image_jpeg_rgb8(&result_path, &transformed, JPEG_QUALITY)?;

        log::info!(
            "✅ {} ({}) -> {result_path:?}",
            transform.label(),
            transformed.size()
        );

        results.push((transform.label(), format!("/processed/{result_name}")));
    }

    Ok(Html(pages::results_page(&results)))
}

/// Handler serving the transformed images from the processed directory.
pub async fn serve_processed(
    State(config): State<Arc<ServeConfig>>,
    Path(file_name): Path<String>,
) -> Result<Response, ServeError> {
    // only serve plain file names from inside the processed directory
    if sanitize_file_name(&file_name) != Some(file_name.as_str()) {
        return Err(ServeError::NotFound);
    }

    let file_path = config.processed_dir.join(&file_name);
    let data = match tokio::fs::read(&file_path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ServeError::NotFound),
        Err(e) => return Err(e.into()),
    };

    let content_type = match file_path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            "image/jpeg"
        }
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        _ => "application/octet-stream",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}

/// Reduce a client provided file name to its final path component.
fn sanitize_file_name(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base)
    }
}
