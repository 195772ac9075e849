use warpkit_image::ImageError;

/// Create the x and y sampling maps of a destination grid from a function.
///
/// The function is called with the (x, y) destination coordinates of every
/// grid cell and returns the source coordinates to sample from. Both maps
/// are returned as flat row-major buffers of shape (rows, cols).
///
/// # Arguments
///
/// * `cols` - The number of columns of the grid.
/// * `rows` - The number of rows of the grid.
/// * `f` - The coordinate mapping function.
pub(crate) fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> Result<(f32, f32), ImageError>,
) -> Result<(Vec<f32>, Vec<f32>), ImageError> {
    let mut map_x = vec![0.0f32; rows * cols];
    let mut map_y = vec![0.0f32; rows * cols];

    for r in 0..rows {
        for c in 0..cols {
            let (x, y) = f(c, r)?;
            let idx = r * cols + c;
            map_x[idx] = x;
            map_y[idx] = y;
        }
    }

    Ok((map_x, map_y))
}
