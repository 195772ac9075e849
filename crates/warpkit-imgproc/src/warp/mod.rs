//! Geometric image transformations using affine and perspective warps.
//!
//! This module provides functions for applying 2D transformations to images:
//!
//! - Affine transformations (rotation, translation, scaling, shearing)
//! - Perspective transformations (homographies)
//! - Rotation matrix generation
//! - Perspective matrix estimation from four point correspondences
//!
//! All warp functions take the matrix mapping source coordinates to
//! destination coordinates, invert it internally and sample the source
//! image, so matrices are interchangeable with the OpenCV conventions.

mod affine;
mod perspective;

pub use affine::{get_rotation_matrix2d, invert_affine_transform, warp_affine};
pub use perspective::{get_perspective_transform, warp_perspective};
