use std::path::Path;

use warpkit_image::{Image, ImageSize};

use crate::error::IoError;
use crate::jpeg::decode_image_jpeg_rgb8;

// JPEG start of image marker
const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Reads an image from the given file path and converts it to RGB8.
///
/// The format is detected from the file content, not from the file
/// extension. JPEG data takes a fast decoding path; everything else goes
/// through the image crate and is converted to RGB8.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A RGB image with three channels _(rgb8)_.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // fast path for jpeg data
    if mmap.len() >= JPEG_SOI.len() && mmap[..JPEG_SOI.len()] == JPEG_SOI {
        return decode_image_jpeg_rgb8(&mmap);
    }

    // decode the data directly from memory guessing the format
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap))
        .with_guessed_format()?
        .decode()?;

    let image_size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(image_size, img.into_rgb8().into_vec())?)
}
