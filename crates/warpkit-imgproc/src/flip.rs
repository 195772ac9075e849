use rayon::prelude::*;
use warpkit_image::{Image, ImageDtype, ImageError};

/// Flip the input image horizontally.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use warpkit_image::{Image, ImageSize};
/// use warpkit_imgproc::flip::horizontal_flip;
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     0u8,
/// ).unwrap();
///
/// let flipped = horizontal_flip(&image).unwrap();
///
/// assert_eq!(flipped.size().width, 2);
/// assert_eq!(flipped.size().height, 3);
/// ```
pub fn horizontal_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: ImageDtype,
{
    let mut dst = src.clone();

    let cols = src.cols();
    if cols < 2 {
        return Ok(dst);
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .for_each(|row| {
            let (mut i, mut j) = (0, cols - 1);
            while i < j {
                for c in 0..C {
                    row.swap(i * C + c, j * C + c);
                }
                i += 1;
                j -= 1;
            }
        });

    Ok(dst)
}
