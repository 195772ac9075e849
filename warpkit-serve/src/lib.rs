#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

/// Service configuration.
pub mod config;

/// Error types for the service handlers.
pub mod error;

/// The transformations applied to uploaded images.
pub mod transform;

mod pages;
mod process;

pub use config::ServeConfig;
pub use error::ServeError;

/// Maximum accepted size of an upload request body.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Build the service router.
///
/// Creates the upload and processed directories if they do not exist.
///
/// # Example
///
/// ```no_run
/// use warpkit_serve::{app, ServeConfig};
///
/// let router = app(ServeConfig::default()).unwrap();
/// ```
pub fn app(config: ServeConfig) -> std::io::Result<Router> {
    config.ensure_dirs()?;

    let state = Arc::new(config);

    Ok(Router::new()
        .route("/", get(pages::index))
        .route("/process", post(process::process_image))
        .route("/processed/:filename", get(process::serve_processed))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state))
}
