use warpkit_image::{Image, ImageDtype, ImageError};

use crate::interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Computes the determinant of a 3x3 matrix.
fn determinant3x3(m: &[f32; 9]) -> f32 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
        + m[2] * (m[3] * m[7] - m[4] * m[6])
}

/// Computes the adjugate of a 3x3 matrix.
#[rustfmt::skip]
fn adjugate3x3(m: &[f32; 9]) -> [f32; 9] {
    [
        m[4] * m[8] - m[5] * m[7], m[2] * m[7] - m[1] * m[8], m[1] * m[5] - m[2] * m[4],
        m[5] * m[6] - m[3] * m[8], m[0] * m[8] - m[2] * m[6], m[2] * m[3] - m[0] * m[5],
        m[3] * m[7] - m[4] * m[6], m[1] * m[6] - m[0] * m[7], m[0] * m[4] - m[1] * m[3],
    ]
}

/// Computes the inverse of a 3x3 perspective matrix.
fn inverse_perspective_matrix(m: &[f32; 9]) -> Result<[f32; 9], ImageError> {
    let det = determinant3x3(m);
    if det == 0.0 {
        return Err(ImageError::CannotComputeDeterminant);
    }

    let adj = adjugate3x3(m);
    let mut m_inv = [0.0; 9];
    for (dst, src) in m_inv.iter_mut().zip(adj.iter()) {
        *dst = src / det;
    }

    Ok(m_inv)
}

/// Applies a perspective transformation to a point.
fn transform_point(x: f32, y: f32, m: &[f32; 9]) -> (f32, f32) {
    let w = m[6] * x + m[7] * y + m[8];
    let w = if w != 0.0 { 1.0 / w } else { 0.0 };
    let u = (m[0] * x + m[1] * y + m[2]) * w;
    let v = (m[3] * x + m[4] * y + m[5]) * w;
    (u, v)
}

/// Computes the 3x3 perspective matrix mapping four source points to four
/// destination points.
///
/// The returned matrix satisfies `dst[i] ~ m * src[i]` in homogeneous
/// coordinates and is normalized so that `m[8] == 1`.
///
/// # Arguments
///
/// * `src` - Four source points as (x, y) pairs.
/// * `dst` - Four destination points as (x, y) pairs.
///
/// # Returns
///
/// The 3x3 perspective matrix in row-major order.
///
/// # Errors
///
/// Returns an error if the correspondences are degenerate, for example when
/// three of the source points are collinear.
///
/// # Example
///
/// ```
/// use warpkit_imgproc::warp::get_perspective_transform;
///
/// let src = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];
/// let dst = [(2.0, 3.0), (3.0, 3.0), (2.0, 4.0), (3.0, 4.0)];
///
/// let m = get_perspective_transform(&src, &dst).unwrap();
/// assert!((m[2] - 2.0).abs() < 1e-4);
/// assert!((m[5] - 3.0).abs() < 1e-4);
/// ```
pub fn get_perspective_transform(
    src: &[(f32, f32); 4],
    dst: &[(f32, f32); 4],
) -> Result<[f32; 9], ImageError> {
    // each correspondence (x, y) -> (u, v) contributes two rows of the
    // augmented 8x9 system a * h = b
    let mut a = [[0.0f64; 9]; 8];
    for (i, (&(x, y), &(u, v))) in src.iter().zip(dst.iter()).enumerate() {
        let (x, y) = (x as f64, y as f64);
        let (u, v) = (u as f64, v as f64);
        a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -x * u, -y * u, u];
        a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -x * v, -y * v, v];
    }

    // gaussian elimination with partial pivoting
    for col in 0..8 {
        let mut pivot_row = col;
        for row in (col + 1)..8 {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if a[pivot_row][col].abs() < 1e-8 {
            return Err(ImageError::DegeneratePointCorrespondences);
        }
        a.swap(col, pivot_row);

        for row in (col + 1)..8 {
            let factor = a[row][col] / a[col][col];
            for k in col..9 {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    // back substitution
    let mut h = [0.0f64; 8];
    for row in (0..8).rev() {
        let mut sum = a[row][8];
        for k in (row + 1)..8 {
            sum -= a[row][k] * h[k];
        }
        h[row] = sum / a[row][row];
    }

    #[rustfmt::skip]
    let m = [
        h[0] as f32, h[1] as f32, h[2] as f32,
        h[3] as f32, h[4] as f32, h[5] as f32,
        h[6] as f32, h[7] as f32, 1.0,
    ];

    Ok(m)
}

/// Applies a perspective transformation to an image.
///
/// Destination pixels that map outside the source image keep the value the
/// destination image was initialized with, so a zero-filled destination
/// yields a black background.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 3x3 perspective matrix in row-major order mapping src to dst.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if the perspective matrix is not invertible.
///
/// # Example
///
/// ```
/// use warpkit_image::{Image, ImageSize};
/// use warpkit_imgproc::interpolation::InterpolationMode;
/// use warpkit_imgproc::warp::warp_perspective;
///
/// let src = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     1u8,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
///
/// let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0u8).unwrap();
///
/// warp_perspective(&src, &mut dst, &m, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(dst.size().width, 4);
/// assert_eq!(dst.size().height, 5);
/// ```
pub fn warp_perspective<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 9],
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    // invert the perspective matrix to find the corresponding source
    // position of every destination pixel
    let m_inv = inverse_perspective_matrix(m)?;

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        let (u_src, v_src) = transform_point(x as f32, y as f32, &m_inv);
        Ok((u_src, v_src))
    })?;

    let (src_cols, src_rows) = (src.cols() as f32, src.rows() as f32);

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        if x >= 0.0f32 && x < src_cols && y >= 0.0f32 && y < src_rows {
            let pixel = interpolate_pixel(src, x, y, interpolation);
            for (k, value) in dst_pixel.iter_mut().enumerate() {
                *value = T::from_f32(pixel[k]);
            }
        }
    });

    Ok(())
}
