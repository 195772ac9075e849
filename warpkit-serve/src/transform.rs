use warpkit::image::{Image, ImageError, ImageSize};
use warpkit::imgproc::crop::crop_image;
use warpkit::imgproc::flip::horizontal_flip;
use warpkit::imgproc::interpolation::InterpolationMode;
use warpkit::imgproc::resize::resize_native;
use warpkit::imgproc::warp::{
    get_perspective_transform, get_rotation_matrix2d, warp_affine, warp_perspective,
};

// fixed transformation parameters
const TRANSLATE_X: f32 = 50.0;
const TRANSLATE_Y: f32 = 100.0;
const ROTATE_DEGREES: f32 = 45.0;
const SCALE_FACTOR: f32 = 1.5;
const SHEAR_X: f32 = 0.2;
const SHEAR_Y: f32 = 0.3;
const CROP_X: usize = 100;
const CROP_Y: usize = 50;
const CROP_WIDTH: usize = 200;
const CROP_HEIGHT: usize = 150;
const PERSPECTIVE_SRC: [(f32, f32); 4] =
    [(50.0, 50.0), (200.0, 50.0), (50.0, 200.0), (200.0, 200.0)];
const PERSPECTIVE_DST: [(f32, f32); 4] =
    [(10.0, 100.0), (180.0, 50.0), (50.0, 250.0), (200.0, 220.0)];

/// The transformations the service can apply to an uploaded image.
///
/// Each transformation uses a fixed set of parameters and produces one
/// result image named after its [`label`](Transform::label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Shift the image 50px right and 100px down.
    Translate,
    /// Rotate the image 45 degrees around its center.
    Rotate,
    /// Scale the image by 1.5x in both dimensions.
    Scale,
    /// Shear the image along both axes.
    Shear,
    /// Mirror the image horizontally.
    Flip,
    /// Cut a fixed region out of the image.
    Crop,
    /// Warp the image with a fixed four point perspective transform.
    Perspective,
}

impl Transform {
    /// All transformations in the order they are applied and displayed.
    pub const ALL: [Transform; 7] = [
        Transform::Translate,
        Transform::Rotate,
        Transform::Scale,
        Transform::Shear,
        Transform::Flip,
        Transform::Crop,
        Transform::Perspective,
    ];

    /// Parse a form checkbox value into a transformation.
    pub fn parse(value: &str) -> Option<Transform> {
        Transform::ALL.into_iter().find(|t| t.form_value() == value)
    }

    /// The value used for this transformation in the upload form.
    pub fn form_value(&self) -> &'static str {
        match self {
            Transform::Translate => "translate",
            Transform::Rotate => "rotate",
            Transform::Scale => "scale",
            Transform::Shear => "shear",
            Transform::Flip => "flip",
            Transform::Crop => "crop",
            Transform::Perspective => "perspective",
        }
    }

    /// The display label, also used as the stem of the result file name.
    pub fn label(&self) -> &'static str {
        match self {
            Transform::Translate => "Translated",
            Transform::Rotate => "Rotated",
            Transform::Scale => "Scaled",
            Transform::Shear => "Sheared",
            Transform::Flip => "Flipped",
            Transform::Crop => "Cropped",
            Transform::Perspective => "Perspective",
        }
    }

    /// Apply the transformation to an image.
    ///
    /// Warps keep the input image size and fill uncovered pixels with
    /// black. Scaling and cropping change the output size.
    pub fn apply(&self, image: &Image<u8, 3>) -> Result<Image<u8, 3>, ImageError> {
        let (cols, rows) = (image.cols(), image.rows());

        match self {
            Transform::Translate => {
                let m = [1.0, 0.0, TRANSLATE_X, 0.0, 1.0, TRANSLATE_Y];
                let mut dst = Image::from_size_val(image.size(), 0u8)?;
                warp_affine(image, &mut dst, &m, InterpolationMode::Bilinear)?;
                Ok(dst)
            }
            Transform::Rotate => {
                let center = ((cols / 2) as f32, (rows / 2) as f32);
                let m = get_rotation_matrix2d(center, ROTATE_DEGREES, 1.0);
                let mut dst = Image::from_size_val(image.size(), 0u8)?;
                warp_affine(image, &mut dst, &m, InterpolationMode::Bilinear)?;
                Ok(dst)
            }
            Transform::Scale => {
                let new_size = ImageSize {
                    width: (cols as f32 * SCALE_FACTOR).round() as usize,
                    height: (rows as f32 * SCALE_FACTOR).round() as usize,
                };
                let mut dst = Image::from_size_val(new_size, 0u8)?;
                resize_native(image, &mut dst, InterpolationMode::Bilinear)?;
                Ok(dst)
            }
            Transform::Shear => {
                let m = [1.0, SHEAR_X, 0.0, SHEAR_Y, 1.0, 0.0];
                let mut dst = Image::from_size_val(image.size(), 0u8)?;
                warp_affine(image, &mut dst, &m, InterpolationMode::Bilinear)?;
                Ok(dst)
            }
            Transform::Flip => horizontal_flip(image),
            Transform::Crop => {
                // intersect the fixed region with the image bounds
                let x0 = CROP_X.min(cols);
                let y0 = CROP_Y.min(rows);
                let x1 = (CROP_X + CROP_WIDTH).min(cols);
                let y1 = (CROP_Y + CROP_HEIGHT).min(rows);
                if x0 == x1 || y0 == y1 {
                    return Err(ImageError::InvalidCropRegion(
                        CROP_X,
                        CROP_Y,
                        CROP_WIDTH,
                        CROP_HEIGHT,
                    ));
                }

                let mut dst = Image::from_size_val(
                    ImageSize {
                        width: x1 - x0,
                        height: y1 - y0,
                    },
                    0u8,
                )?;
                crop_image(image, &mut dst, x0, y0)?;
                Ok(dst)
            }
            Transform::Perspective => {
                let m = get_perspective_transform(&PERSPECTIVE_SRC, &PERSPECTIVE_DST)?;
                let mut dst = Image::from_size_val(image.size(), 0u8)?;
                warp_perspective(image, &mut dst, &m, InterpolationMode::Bilinear)?;
                Ok(dst)
            }
        }
    }
}
