use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use warpkit::image::ImageError;
use warpkit::io::error::IoError;

/// An error type for the service handlers.
///
/// Every variant maps to an HTTP status code and a plain text body, so
/// handlers can simply return a `Result` and let axum render the error.
#[derive(thiserror::Error, Debug)]
pub enum ServeError {
    /// The multipart form did not contain an image file field.
    #[error("No file uploaded.")]
    MissingFile,

    /// The image file field had an empty file name.
    #[error("No selected file.")]
    EmptyFilename,

    /// The uploaded data could not be decoded as an image.
    #[error("Error loading the image. Ensure it is a valid image file.")]
    Decode(#[source] IoError),

    /// The requested file does not exist.
    #[error("File not found.")]
    NotFound,

    /// Error while reading the multipart form data.
    #[error("Failed to read the multipart form data. {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// Error while applying a transformation.
    #[error("Failed to transform the image. {0}")]
    Image(#[from] ImageError),

    /// Error while encoding or writing a result image.
    #[error("Failed to write the result image. {0}")]
    Io(#[from] IoError),

    /// Filesystem error.
    #[error("Failed to manipulate the file. {0}")]
    File(#[from] std::io::Error),
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServeError::MissingFile
            | ServeError::EmptyFilename
            | ServeError::Decode(_)
            | ServeError::Multipart(_) => StatusCode::BAD_REQUEST,
            ServeError::NotFound => StatusCode::NOT_FOUND,
            ServeError::Image(_) | ServeError::Io(_) | ServeError::File(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            log::error!("💥 {self}");
        }

        (status, self.to_string()).into_response()
    }
}
