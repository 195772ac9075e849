/// An error type for the image module.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the source and destination sizes do not match.
    #[error("Image size mismatch (src: {0}x{1}, dst: {2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a crop region does not fit inside the source image.
    #[error("Invalid crop region (x: {0}, y: {1}, width: {2}, height: {3})")]
    InvalidCropRegion(usize, usize, usize, usize),

    /// Error when a transformation matrix is not invertible.
    #[error("Cannot compute the determinant of the transformation matrix")]
    CannotComputeDeterminant,

    /// Error when the four point correspondences do not define a homography.
    #[error("Cannot solve the perspective transform from the given point correspondences")]
    DegeneratePointCorrespondences,
}
