use std::path::PathBuf;

/// Directories used by the service to store uploads and results.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Where uploaded images are saved before decoding.
    pub upload_dir: PathBuf,
    /// Where transformed images are written.
    pub processed_dir: PathBuf,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            processed_dir: PathBuf::from("processed"),
        }
    }
}

impl ServeConfig {
    /// Create the upload and processed directories if they do not exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.processed_dir)?;
        Ok(())
    }
}
