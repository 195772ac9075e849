use warpkit_image::{Image, ImageDtype, ImageError};

use crate::interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Resize an image to a new size.
///
/// The destination image size determines the output size, so the caller
/// allocates the destination with the desired dimensions. The corner
/// pixels of the source and destination images are aligned.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (new_height, new_width, channels).
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if the source or destination image has a zero
/// dimension.
///
/// # Example
///
/// ```
/// use warpkit_image::{Image, ImageSize};
/// use warpkit_imgproc::interpolation::InterpolationMode;
/// use warpkit_imgproc::resize::resize_native;
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     0u8,
/// ).unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<u8, 3>::from_size_val(new_size, 0u8).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if src.cols() == 0 || src.rows() == 0 || dst.cols() == 0 || dst.rows() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // no resampling is needed when the sizes match
    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());

    // align the corner pixels of the source and destination grids
    let step_x = if dst_cols > 1 {
        (src.cols() - 1) as f32 / (dst_cols - 1) as f32
    } else {
        0.0
    };
    let step_y = if dst_rows > 1 {
        (src.rows() - 1) as f32 / (dst_rows - 1) as f32
    } else {
        0.0
    };

    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        Ok((x as f32 * step_x, y as f32 * step_y))
    })?;

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        let pixel = interpolate_pixel(src, x, y, interpolation);
        for (k, value) in dst_pixel.iter_mut().enumerate() {
            *value = T::from_f32(pixel[k]);
        }
    });

    Ok(())
}
