use image::RgbImage;
use nalgebra::Point2;

use crate::homography::{homography_from_4pt, Homography};
use crate::quad::OrderedQuad;

/// Side length of the canonical rectified square handed to the watermark
/// decoder.
pub const DEFAULT_OUTPUT_SIZE: u32 = 1024;

/// Homography mapping the output square `[0,S]x[0,S]` onto the quad.
///
/// Source corners are the square `[(0,0),(S,0),(S,S),(0,S)]` matched
/// against the quad's `[TL,TR,BR,BL]`.
pub fn square_to_quad_homography(quad: &OrderedQuad, output_size: u32) -> Option<Homography> {
    let s = output_size as f32;
    let square = [
        Point2::new(0.0, 0.0),
        Point2::new(s, 0.0),
        Point2::new(s, s),
        Point2::new(0.0, s),
    ];
    homography_from_4pt(&square, quad.corners())
}

/// Warp the quad region of `src` into an `output_size` x `output_size`
/// image: every destination pixel center is mapped through the
/// square-to-quad homography and bilinearly sampled from the source.
///
/// This never fails structurally. A degenerate quad that slips past
/// upstream validation yields a singular system; the blank fallback image
/// simply fails to decode downstream.
pub fn rectify(src: &RgbImage, quad: &OrderedQuad, output_size: u32) -> RgbImage {
    let Some(h) = square_to_quad_homography(quad, output_size) else {
        return RgbImage::new(output_size, output_size);
    };

    let mut out = RgbImage::new(output_size, output_size);
    for y in 0..output_size {
        for x in 0..output_size {
            let dst_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            let p = h.apply(dst_center);
            // back to pixel-index space before sampling
            let rgb = sample_bilinear_rgb(src, p.x - 0.5, p.y - 0.5);
            out.put_pixel(x, y, image::Rgb(rgb));
        }
    }
    out
}

#[inline]
fn get_rgb(src: &RgbImage, x: i32, y: i32) -> [f32; 3] {
    if x < 0 || y < 0 || x >= src.width() as i32 || y >= src.height() as i32 {
        return [0.0; 3];
    }
    let p = src.get_pixel(x as u32, y as u32).0;
    [p[0] as f32, p[1] as f32, p[2] as f32]
}

#[inline]
fn sample_bilinear_rgb(src: &RgbImage, x: f32, y: f32) -> [u8; 3] {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_rgb(src, x0, y0);
    let p10 = get_rgb(src, x0 + 1, y0);
    let p01 = get_rgb(src, x0, y0 + 1);
    let p11 = get_rgb(src, x0 + 1, y0 + 1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let a = p00[c] + fx * (p10[c] - p00[c]);
        let b = p01[c] + fx * (p11[c] - p01[c]);
        out[c] = (a + fy * (b - a)).clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::order_corners;
    use image::Rgb;

    fn gradient_image(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            Rgb([(x * 3 % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn identity_quad_reproduces_the_source() {
        let size = 64u32;
        let src = gradient_image(size);
        let s = size as f32;
        let quad = order_corners([
            Point2::new(0.0, 0.0),
            Point2::new(s, 0.0),
            Point2::new(s, s),
            Point2::new(0.0, s),
        ]);

        let out = rectify(&src, &quad, size);
        for y in 0..size {
            for x in 0..size {
                let a = src.get_pixel(x, y).0;
                let b = out.get_pixel(x, y).0;
                for c in 0..3 {
                    let diff = (a[c] as i16 - b[c] as i16).abs();
                    assert!(diff <= 1, "pixel ({x},{y}) channel {c}: {diff} off");
                }
            }
        }
    }

    #[test]
    fn axis_aligned_crop_is_extracted() {
        // Solid red block in the middle of a black frame.
        let mut src = RgbImage::new(100, 100);
        for y in 20..80 {
            for x in 30..70 {
                src.put_pixel(x, y, Rgb([200, 0, 0]));
            }
        }
        let quad = order_corners([
            Point2::new(30.0, 20.0),
            Point2::new(70.0, 20.0),
            Point2::new(70.0, 80.0),
            Point2::new(30.0, 80.0),
        ]);

        let out = rectify(&src, &quad, 32);
        // Away from the border everything must be the block color.
        for y in 4..28 {
            for x in 4..28 {
                assert_eq!(out.get_pixel(x, y).0, [200, 0, 0], "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn degenerate_quad_yields_a_blank_image() {
        let src = gradient_image(32);
        let quad = order_corners([
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0),
        ]);
        let out = rectify(&src, &quad, 16);
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
