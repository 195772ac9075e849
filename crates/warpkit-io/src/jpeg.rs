use std::{fs, path::Path};

use jpeg_encoder::{ColorType, Encoder};
use zune_jpeg::zune_core::colorspace::ColorSpace;
use zune_jpeg::zune_core::options::DecoderOptions;

use warpkit_image::{Image, ImageSize};

use crate::error::IoError;

// JPEG stores image dimensions as u16
fn check_jpeg_dimensions(image_size: ImageSize) -> Result<(), IoError> {
    if image_size.width > u16::MAX as usize || image_size.height > u16::MAX as usize {
        return Err(IoError::JpegImageTooLarge(image_size.width, image_size.height));
    }
    Ok(())
}

/// Writes the given JPEG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image containing the JPEG image data.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
///
/// # Errors
///
/// Fails if either image dimension exceeds 65535, the largest size the JPEG
/// format can store, or if the file cannot be written.
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    quality: u8,
) -> Result<(), IoError> {
    let image_size = image.size();
    check_jpeg_dimensions(image_size)?;
    let encoder = Encoder::new_file(file_path, quality)?;
    encoder.encode(
        image.as_slice(),
        image_size.width as u16,
        image_size.height as u16,
        ColorType::Rgb,
    )?;
    Ok(())
}

/// Encodes the given image _(rgb8)_ into an in-memory JPEG buffer.
///
/// # Arguments
///
/// - `image` - The image containing the JPEG image data.
/// - `quality` - The quality of the JPEG encoding, range from 0 (lowest) to 100 (highest)
///
/// # Errors
///
/// Fails if either image dimension exceeds 65535, the largest size the JPEG
/// format can store.
pub fn encode_image_jpeg_rgb8(image: &Image<u8, 3>, quality: u8) -> Result<Vec<u8>, IoError> {
    let image_size = image.size();
    check_jpeg_dimensions(image_size)?;
    let mut jpeg_data = Vec::new();
    let encoder = Encoder::new(&mut jpeg_data, quality);
    encoder.encode(
        image.as_slice(),
        image_size.width as u16,
        image_size.height as u16,
        ColorType::Rgb,
    )?;
    Ok(jpeg_data)
}

/// Read a JPEG image with three channels _(rgb8)_.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG file.
///
/// # Returns
///
/// A RGB image with three channels _(rgb8)_.
pub fn read_image_jpeg_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path.extension().map_or(true, |ext| {
        !ext.eq_ignore_ascii_case("jpg") && !ext.eq_ignore_ascii_case("jpeg")
    }) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let jpeg_data = fs::read(file_path)?;
    decode_image_jpeg_rgb8(&jpeg_data)
}

/// Decodes a JPEG image with three channels _(rgb8)_ from raw bytes.
///
/// Grayscale and CMYK sources are converted to RGB.
///
/// # Arguments
///
/// - `jpeg_data` - Raw bytes of the jpeg file
pub fn decode_image_jpeg_rgb8(jpeg_data: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = zune_jpeg::JpegDecoder::new_with_options(jpeg_data, options);
    decoder.decode_headers()?;

    let image_info = decoder.info().ok_or_else(|| {
        IoError::JpegDecodingError(zune_jpeg::errors::DecodeErrors::Format(String::from(
            "Failed to find image info from its metadata",
        )))
    })?;

    let image_size = ImageSize {
        width: image_info.width as usize,
        height: image_info.height as usize,
    };

    let img_data = decoder.decode()?;

    // the decoder keeps single component sources in luma even when RGB
    // output is requested, so expand them here
    let num_pixels = image_size.width * image_size.height;
    let img_data = if img_data.len() == num_pixels {
        let mut rgb_data = Vec::with_capacity(num_pixels * 3);
        for &luma in &img_data {
            rgb_data.extend_from_slice(&[luma, luma, luma]);
        }
        rgb_data
    } else {
        img_data
    };

    Ok(Image::new(image_size, img_data)?)
}
