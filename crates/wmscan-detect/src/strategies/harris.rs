use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use log::debug;
use nalgebra::Point2;

use super::QuadDetector;
use crate::params::HarrisParams;
use wmscan_core::{extremal_corners, Quad};

/// Strategy 3: Harris corner response over the whole frame, for complex
/// or multi-object scenes where no clean outline contour exists.
///
/// Strong response pixels are merged with a max filter, thresholded
/// relative to the global maximum, and reduced to four outer corners with
/// the extremal `(x +- y)` heuristic. That heuristic is approximate for
/// rotated or concave point clouds; the cascade compensates by retrying
/// with the next strategy when the decode fails.
pub struct HarrisStrategy {
    params: HarrisParams,
}

impl HarrisStrategy {
    pub fn new(params: HarrisParams) -> Self {
        Self { params }
    }
}

impl QuadDetector for HarrisStrategy {
    fn name(&self) -> &'static str {
        "harris_corners"
    }

    fn detect(&self, gray: &GrayImage) -> Option<Quad> {
        let (w, h) = (gray.width() as usize, gray.height() as usize);
        let response = harris_response(gray, self.params.k, self.params.block_radius);
        let merged = max_filter_3x3(&response, w, h);

        let max_response = merged.iter().cloned().fold(0.0f32, f32::max);
        if max_response <= 0.0 {
            return None;
        }
        let threshold = self.params.threshold_rel * max_response;

        let mut points = Vec::new();
        for y in 0..h {
            for x in 0..w {
                if merged[y * w + x] > threshold {
                    points.push(Point2::new(x as f32, y as f32));
                }
            }
        }
        if points.len() < 4 {
            return None;
        }
        debug!("harris_corners: {} response pixels above threshold", points.len());

        // The heuristic already emits [TL, TR, BR, BL].
        extremal_corners(&points).map(Quad::new)
    }
}

/// Harris corner response map: structure tensor from Sobel gradients,
/// summed over a `(2r+1)^2` window, scored as `det - k * trace^2`.
fn harris_response(gray: &GrayImage, k: f32, block_radius: u32) -> Vec<f32> {
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);

    // Gradient products, normalized so responses stay in a sane range.
    let mut ixx = vec![0.0f32; w * h];
    let mut iyy = vec![0.0f32; w * h];
    let mut ixy = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let dx = gx.get_pixel(x as u32, y as u32).0[0] as f32 / 255.0;
            let dy = gy.get_pixel(x as u32, y as u32).0[0] as f32 / 255.0;
            let i = y * w + x;
            ixx[i] = dx * dx;
            iyy[i] = dy * dy;
            ixy[i] = dx * dy;
        }
    }

    let r = block_radius as i64;
    let mut response = vec![0.0f32; w * h];
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let mut sxx = 0.0f32;
            let mut syy = 0.0f32;
            let mut sxy = 0.0f32;
            for dy in -r..=r {
                for dx in -r..=r {
                    let yy = y + dy;
                    let xx = x + dx;
                    if yy < 0 || xx < 0 || yy >= h as i64 || xx >= w as i64 {
                        continue;
                    }
                    let i = yy as usize * w + xx as usize;
                    sxx += ixx[i];
                    syy += iyy[i];
                    sxy += ixy[i];
                }
            }
            let det = sxx * syy - sxy * sxy;
            let trace = sxx + syy;
            response[y as usize * w + x as usize] = det - k * trace * trace;
        }
    }
    response
}

/// 3x3 max filter, the equivalent of dilating the response map to merge
/// adjacent peaks.
fn max_filter_3x3(src: &[f32], w: usize, h: usize) -> Vec<f32> {
    let mut out = vec![f32::MIN; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut m = f32::MIN;
            for dy in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for dx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    m = m.max(src[dy * w + dx]);
                }
            }
            out[y * w + x] = m;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn uniform_frame_yields_nothing() {
        let img = GrayImage::from_pixel(64, 64, Luma([128u8]));
        let strategy = HarrisStrategy::new(HarrisParams::default());
        assert!(strategy.detect(&img).is_none());
    }

    #[test]
    fn square_corners_are_localized() {
        let mut img = GrayImage::from_pixel(100, 100, Luma([10u8]));
        for y in 30..70 {
            for x in 30..70 {
                img.put_pixel(x, y, Luma([240u8]));
            }
        }
        let strategy = HarrisStrategy::new(HarrisParams::default());
        let quad = strategy.detect(&img).expect("corners expected");

        let expected = [
            Point2::new(30.0f32, 30.0),
            Point2::new(69.0, 30.0),
            Point2::new(69.0, 69.0),
            Point2::new(30.0, 69.0),
        ];
        for (got, want) in quad.points.iter().zip(expected.iter()) {
            let d = (got - want).norm();
            assert!(d <= 5.0, "corner {got:?} too far from {want:?} ({d:.1} px)");
        }
    }
}
