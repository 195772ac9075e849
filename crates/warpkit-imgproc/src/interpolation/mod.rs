//! Pixel interpolation methods for image transformations.
//!
//! This module provides the interpolation kernels used when resampling
//! images during geometric transformations like resizing or warping.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: fastest, uses the nearest pixel value (no interpolation)
//! - **Bilinear**: smooth linear interpolation between adjacent pixels

mod bilinear;

pub(crate) mod grid;

pub(crate) mod interpolate;
mod nearest;

pub use interpolate::interpolate_pixel;
pub use interpolate::InterpolationMode;
