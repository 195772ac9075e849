use rayon::prelude::*;
use warpkit_image::{Image, ImageDtype, ImageError};

/// Crop a region out of an image.
///
/// The size of the destination image determines the size of the cropped
/// region, starting at the top-left corner (x, y) of the source image.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with the shape of the region to extract.
/// * `x` - The column of the top-left corner of the region.
/// * `y` - The row of the top-left corner of the region.
///
/// # Errors
///
/// Returns an error if the region does not fit inside the source image.
///
/// # Example
///
/// ```
/// use warpkit_image::{Image, ImageSize};
/// use warpkit_imgproc::crop::crop_image;
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     0u8,
/// ).unwrap();
///
/// let mut cropped = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     0u8,
/// ).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.size().width, 2);
/// assert_eq!(cropped.size().height, 3);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    let (dst_cols, dst_rows) = (dst.cols(), dst.rows());
    if dst_cols == 0 || dst_rows == 0 || x + dst_cols > src.cols() || y + dst_rows > src.rows() {
        return Err(ImageError::InvalidCropRegion(x, y, dst_cols, dst_rows));
    }

    let src_cols = src.cols();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, row)| {
            let offset = ((y + i) * src_cols + x) * C;
            row.copy_from_slice(&src_data[offset..offset + dst_cols * C]);
        });

    Ok(())
}
