//! The four quadrilateral detection strategies.
//!
//! Each strategy independently consumes one grayscale frame and produces
//! at most one candidate quad. The cascade order lives in
//! [`default_strategies`]; reordering or extending it is a configuration
//! change, not a code edit.

mod contour;
mod document;
mod edge;
mod harris;

pub use contour::ContourStrategy;
pub use document::DocumentStrategy;
pub use edge::EdgeStrategy;
pub use harris::HarrisStrategy;

use image::GrayImage;
use imageproc::contours::Contour;
use nalgebra::Point2;

use crate::params::ScanParams;
use wmscan_core::Quad;

/// A single quadrilateral detection strategy.
///
/// `None` is the normal "nothing found here" outcome; strategies never
/// fail loudly on well-formed input.
pub trait QuadDetector {
    /// Stable name used for attribution in scan outcomes.
    fn name(&self) -> &'static str;

    /// Look for one quadrilateral candidate in the grayscale frame.
    fn detect(&self, gray: &GrayImage) -> Option<Quad>;
}

/// The default cascade, in priority order: document outline, general
/// contours, Harris corners, Hough-line intersections.
pub fn default_strategies(params: &ScanParams) -> Vec<Box<dyn QuadDetector>> {
    vec![
        Box::new(DocumentStrategy::new(params.document.clone())),
        Box::new(ContourStrategy::new(params.contour.clone())),
        Box::new(HarrisStrategy::new(params.harris.clone())),
        Box::new(EdgeStrategy::new(params.edge.clone())),
    ]
}

/// Convert a traced pixel contour into floating-point image coordinates.
pub(crate) fn contour_points(contour: &Contour<i32>) -> Vec<Point2<f32>> {
    contour
        .points
        .iter()
        .map(|p| Point2::new(p.x as f32, p.y as f32))
        .collect()
}
