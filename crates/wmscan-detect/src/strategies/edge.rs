use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::bilateral_filter;
use imageproc::hough::{detect_lines, LineDetectionOptions, PolarLine};
use log::debug;
use nalgebra::Point2;

use super::QuadDetector;
use crate::params::EdgeParams;
use wmscan_core::{extremal_corners, polar_line_intersection, Quad};

/// Strategy 4: Hough-line intersection, for high-contrast geometric
/// shapes whose sides survive as long straight lines.
///
/// All pairwise intersections of the detected lines are collected, those
/// outside the frame are discarded, and the extremal `(x +- y)` heuristic
/// reduces the rest to four corners, which must be distinct.
pub struct EdgeStrategy {
    params: EdgeParams,
}

impl EdgeStrategy {
    pub fn new(params: EdgeParams) -> Self {
        Self { params }
    }
}

impl QuadDetector for EdgeStrategy {
    fn name(&self) -> &'static str {
        "edge_corners"
    }

    fn detect(&self, gray: &GrayImage) -> Option<Quad> {
        let filtered = bilateral_filter(
            gray,
            self.params.bilateral_window,
            self.params.sigma_color,
            self.params.sigma_spatial,
        );
        let edges = canny(&filtered, self.params.canny_low, self.params.canny_high);
        let lines = detect_lines(
            &edges,
            LineDetectionOptions {
                vote_threshold: self.params.vote_threshold,
                suppression_radius: self.params.suppression_radius,
            },
        );
        if lines.len() < 4 {
            return None;
        }
        debug!("edge_corners: {} Hough lines", lines.len());

        let (w, h) = (gray.width() as f32, gray.height() as f32);
        let mut intersections = Vec::new();
        for i in 0..lines.len() {
            for j in (i + 1)..lines.len() {
                let Some(p) = polar_line_intersection(polar(&lines[i]), polar(&lines[j])) else {
                    continue;
                };
                if p.x >= 0.0 && p.x < w && p.y >= 0.0 && p.y < h {
                    intersections.push(p);
                }
            }
        }

        let corners = extremal_corners(&intersections)?;
        // The heuristic can collapse onto repeated points when the cloud
        // is too tight; a quad needs four distinct corners.
        for i in 0..4 {
            for j in (i + 1)..4 {
                if (corners[i] - corners[j]).norm() < 1.0 {
                    return None;
                }
            }
        }
        Some(Quad::new(corners))
    }
}

fn polar(line: &PolarLine) -> (f32, f32) {
    (line.r, (line.angle_in_degrees as f32).to_radians())
}
