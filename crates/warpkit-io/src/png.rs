use std::{fs::File, path::Path};

use png::{BitDepth, ColorType, Decoder, Encoder};

use warpkit_image::{Image, ImageSize};

use crate::error::IoError;

/// Read a PNG image with three channels (rgb8).
///
/// # Arguments
///
/// - `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A RGB image with three channels (rgb8).
pub fn read_image_png_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("png"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file = File::open(file_path)?;
    let mut reader = Decoder::new(file)
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let image_size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };

    Ok(Image::new(image_size, buf)?)
}

/// Writes the given PNG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the PNG image data.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;
    encode_png_impl(file, image)
}

/// Encodes the given image _(rgb8)_ into an in-memory PNG buffer.
///
/// # Arguments
///
/// - `image` - The image containing the PNG image data.
pub fn encode_image_png_rgb8(image: &Image<u8, 3>) -> Result<Vec<u8>, IoError> {
    let mut png_data = Vec::new();
    encode_png_impl(&mut png_data, image)?;
    Ok(png_data)
}

fn encode_png_impl<W: std::io::Write>(writer: W, image: &Image<u8, 3>) -> Result<(), IoError> {
    let image_size = image.size();

    let mut encoder = Encoder::new(writer, image_size.width as u32, image_size.height as u32);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image.as_slice())
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}
