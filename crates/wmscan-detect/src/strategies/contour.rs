use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::contrast::adaptive_threshold;
use log::debug;
use nalgebra::Point2;

use super::{contour_points, QuadDetector};
use crate::params::ContourParams;
use crate::result::DetectionCandidate;
use wmscan_core::{approx_polygon, shoelace_area, Quad};

/// Strategy 2: general contour detection, tuned for digital images and
/// screenshots where the region boundary survives adaptive thresholding.
///
/// Considers the full contour set (not just outer borders), filters by
/// absolute area and bounding-box aspect ratio, and keeps the largest
/// 4-vertex candidate.
pub struct ContourStrategy {
    params: ContourParams,
}

impl ContourStrategy {
    pub fn new(params: ContourParams) -> Self {
        Self { params }
    }
}

impl QuadDetector for ContourStrategy {
    fn name(&self) -> &'static str {
        "contour_corners"
    }

    fn detect(&self, gray: &GrayImage) -> Option<Quad> {
        let binary = adaptive_threshold(gray, self.params.block_radius);
        let frame_area = gray.width() as f32 * gray.height() as f32;

        let mut candidates: Vec<DetectionCandidate> = Vec::new();
        for contour in &find_contours::<i32>(&binary) {
            let points = contour_points(contour);
            let area = shoelace_area(&points);
            if area < self.params.min_area {
                continue;
            }
            // A border contour traced around a featureless frame is not a
            // region candidate.
            if area >= frame_area * self.params.max_area_ratio {
                continue;
            }

            let aspect = bounding_box_aspect(&points);
            if aspect < self.params.min_aspect || aspect > self.params.max_aspect {
                continue;
            }

            if let Some(quad) = approx_polygon(&points, self.params.epsilon_ratio) {
                candidates.push(DetectionCandidate {
                    quad,
                    strategy: self.name(),
                    area,
                });
            }
        }

        let best = candidates
            .into_iter()
            .max_by(|a, b| a.area.partial_cmp(&b.area).unwrap_or(std::cmp::Ordering::Equal))?;
        debug!(
            "contour_corners: picked candidate with contour area {:.0} px^2",
            best.area
        );
        Some(best.quad)
    }
}

fn bounding_box_aspect(points: &[Point2<f32>]) -> f32 {
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let h = max_y - min_y;
    if h <= 0.0 {
        return 0.0;
    }
    (max_x - min_x) / h
}
