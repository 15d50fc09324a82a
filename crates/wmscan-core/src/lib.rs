//! Geometry and image primitives for locating and rectifying a
//! watermarked quadrilateral region inside a photograph.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete detection strategy or on the watermark codec.

mod geometry;
mod homography;
mod logger;
mod quad;
mod rectify;

pub use geometry::{
    approx_polygon, closed_perimeter, extremal_corners, polar_line_intersection,
    DEFAULT_EPSILON_RATIO,
};
pub use homography::{homography_from_4pt, Homography};
pub use quad::{order_corners, shoelace_area, OrderedQuad, Quad};
pub use rectify::{rectify, square_to_quad_homography, DEFAULT_OUTPUT_SIZE};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
