use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::close;
use log::debug;
use nalgebra::Point2;

use super::{contour_points, QuadDetector};
use crate::params::DocumentParams;
use wmscan_core::{approx_polygon, shoelace_area, Quad};

/// Strategy 1: document/paper outline detection, best for photos of
/// printed images.
///
/// Blur, Canny, morphological close to bridge small edge gaps, then walk
/// the largest outer contours looking for the first big quadrilateral.
pub struct DocumentStrategy {
    params: DocumentParams,
}

impl DocumentStrategy {
    pub fn new(params: DocumentParams) -> Self {
        Self { params }
    }
}

impl QuadDetector for DocumentStrategy {
    fn name(&self) -> &'static str {
        "document_corners"
    }

    fn detect(&self, gray: &GrayImage) -> Option<Quad> {
        let blurred = gaussian_blur_f32(gray, self.params.blur_sigma);
        let edges = canny(&blurred, self.params.canny_low, self.params.canny_high);
        let bridged = close(&edges, Norm::LInf, 1);

        let mut outlines: Vec<(f32, Vec<Point2<f32>>)> = find_contours::<i32>(&bridged)
            .iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| {
                let pts = contour_points(c);
                (shoelace_area(&pts), pts)
            })
            .collect();
        outlines.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let min_area = gray.width() as f32 * gray.height() as f32 * self.params.min_area_ratio;
        for (_, points) in outlines.iter().take(self.params.max_contours) {
            let Some(quad) = approx_polygon(points, self.params.epsilon_ratio) else {
                continue;
            };
            let area = quad.area();
            if area > min_area {
                debug!("document_corners: accepted quad with area {area:.0} px^2");
                return Some(quad);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn dark_square_on_white(size: u32, offset: u32, side: u32) -> GrayImage {
        let mut img = GrayImage::from_pixel(size, size, Luma([255u8]));
        for y in offset..offset + side {
            for x in offset..offset + side {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
        img
    }

    #[test]
    fn finds_a_centered_square() {
        let img = dark_square_on_white(240, 60, 120);
        let strategy = DocumentStrategy::new(DocumentParams::default());
        let quad = strategy.detect(&img).expect("square should be found");

        let ordered = quad.order();
        let c = ordered.corners();
        // Edge localization wanders by a couple of pixels after blur+close.
        assert!((c[0].x - 60.0).abs() <= 3.0 && (c[0].y - 60.0).abs() <= 3.0);
        assert!((c[2].x - 179.0).abs() <= 3.0 && (c[2].y - 179.0).abs() <= 3.0);
        assert!(quad.area() > 0.9 * 120.0 * 120.0);
    }

    #[test]
    fn rejects_a_small_square() {
        // 30x30 on a 240x240 frame is under the 10% area floor.
        let img = dark_square_on_white(240, 100, 30);
        let strategy = DocumentStrategy::new(DocumentParams::default());
        assert!(strategy.detect(&img).is_none());
    }

    #[test]
    fn blank_frame_yields_nothing() {
        let img = GrayImage::from_pixel(120, 120, Luma([200u8]));
        let strategy = DocumentStrategy::new(DocumentParams::default());
        assert!(strategy.detect(&img).is_none());
    }
}
